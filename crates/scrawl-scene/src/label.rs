// SPDX-License-Identifier: Apache-2.0
//! Per-channel categorical label coloring.

use std::collections::HashMap;

use crate::color::{palette_color, ColorRgb};
use crate::intern::LabelId;

/// Number of categorical coloring channels a point can be colored by.
pub const LABEL_CHANNELS: usize = 4;

/// Color slots stamped onto each point: slot 0 is the base color, slot
/// `c + 1` the overlay assigned through channel `c`.
pub const OVERLAY_SLOTS: usize = LABEL_CHANNELS + 1;

/// Label → color assignments for one channel.
///
/// The Nth distinct label seen in a channel always receives the Nth palette
/// color, so runs with identical input order color identically. An
/// assignment is never revoked except by [`LabelTable::clear`].
#[derive(Debug, Default)]
pub struct LabelTable {
    assigned: HashMap<LabelId, ColorRgb>,
    order: Vec<LabelId>,
}

impl LabelTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `label`, assigning the next palette color on first sight.
    pub fn color_for(&mut self, label: LabelId) -> ColorRgb {
        if let Some(&color) = self.assigned.get(&label) {
            return color;
        }
        let color = palette_color(self.order.len());
        self.order.push(label);
        self.assigned.insert(label, color);
        color
    }

    /// Assigned labels with their colors, in first-seen order (legend rows).
    pub fn entries(&self) -> impl Iterator<Item = (LabelId, ColorRgb)> + '_ {
        self.order
            .iter()
            .map(move |id| (*id, self.assigned[id]))
    }

    /// Number of labels assigned so far.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no label has been assigned.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop every assignment (full scene reset).
    pub fn clear(&mut self) {
        self.assigned.clear();
        self.order.clear();
    }
}
