// SPDX-License-Identifier: Apache-2.0
//! Shared hub state: the frame, the label machinery, and per-client scratch.

use std::collections::HashMap;

use scrawl_scene::{
    Bounds, ColorRgb, Frame, Interner, LabelId, LabelTable, DEFAULT_COLOR, LABEL_CHANNELS,
    OVERLAY_SLOTS,
};

use crate::sync::SyncState;

/// Identifier for one live client connection.
///
/// Stable for the life of the connection; a given id is only reused after
/// the old connection's state has been torn down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

/// Per-connection scratch state. Never shared across clients and destroyed
/// on disconnect.
#[derive(Clone, Debug)]
pub struct ClientState {
    /// Slot 0 is the current base color; slot `c + 1` the overlay picked up
    /// through channel `c`. Stamped onto every append from this client.
    pub colors: [ColorRgb; OVERLAY_SLOTS],
    /// Client-chosen small keys → interned label ids. Always
    /// presence-checked before use; clients are untrusted.
    pub labels: HashMap<i32, LabelId>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            colors: [DEFAULT_COLOR; OVERLAY_SLOTS],
            labels: HashMap::new(),
        }
    }
}

/// View parameters owned by the windowing layer but consulted every frame.
#[derive(Clone, Copy, Debug)]
pub struct ViewSettings {
    /// Fraction of the accumulated objects to draw, front of append order
    /// first. Clamped to `[0, 1]` at use.
    pub filter: f32,
    /// 0 draws base colors; `c + 1` draws channel `c` overlays.
    pub color_by: usize,
    /// Point sprite size handed to the render port.
    pub point_size: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            filter: 1.0,
            color_by: 0,
            point_size: 5.0,
        }
    }
}

impl ViewSettings {
    /// Point color slot for the current color-by selection.
    pub fn color_slot(&self) -> usize {
        self.color_by.min(OVERLAY_SLOTS - 1)
    }
}

/// Everything the interpreter and the renderer share.
///
/// All mutation funnels through the command interpreter and the per-frame
/// render path, both of which run under the hub lock, so no two mutations
/// ever interleave at sub-command granularity.
#[derive(Debug, Default)]
pub struct HubState {
    /// The accumulating scene.
    pub frame: Frame,
    /// Process-wide label text table, shared by all clients.
    pub interner: Interner,
    /// One label → color table per channel, shared by all clients.
    pub labels: [LabelTable; LABEL_CHANNELS],
    /// Live connections.
    pub clients: HashMap<ClientId, ClientState>,
    /// Refresh/clear flags for the render sync protocol.
    pub sync: SyncState,
    /// Bounds captured at the last refresh; what the renderer frames with.
    pub captured_bounds: Bounds,
    /// Current view parameters.
    pub view: ViewSettings,
    next_client: u64,
}

impl HubState {
    /// Create an empty hub state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id and fresh scratch state for a new connection.
    pub fn register_client(&mut self) -> ClientId {
        let id = ClientId(self.next_client);
        self.next_client += 1;
        self.clients.insert(id, ClientState::default());
        id
    }

    /// Tear down a connection's scratch state. The shared frame and label
    /// tables are untouched.
    pub fn remove_client(&mut self, id: ClientId) {
        self.clients.remove(&id);
    }
}
