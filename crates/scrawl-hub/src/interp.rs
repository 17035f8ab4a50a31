// SPDX-License-Identifier: Apache-2.0
//! Command interpreter: applies decoded commands to the shared hub state.
//!
//! Runs entirely under the hub lock and never blocks. Protocol errors were
//! already rejected at decode time; the only failures left here are lookup
//! misses, which are silent no-ops by contract — a client referencing an
//! unmapped key or a bad channel must not disturb anyone else.

use glam::Vec3;
use scrawl_proto::Command;
use scrawl_scene::{ColorRgb, DEFAULT_COLOR, LABEL_CHANNELS, OVERLAY_SLOTS};

use crate::state::{ClientId, HubState};
use crate::sync::ClearDisposition;

/// Post-apply instructions for the delivery loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Pause delivery for all clients until the next frame completes.
    pub pause_delivery: bool,
    /// The renderer should schedule a redraw.
    pub redraw: bool,
}

/// Apply one command from `client` to the shared state.
pub fn apply(st: &mut HubState, client: ClientId, cmd: Command) -> Outcome {
    let mut out = Outcome::default();
    match cmd {
        Command::Point { position } => {
            let colors = st
                .clients
                .get(&client)
                .map_or([DEFAULT_COLOR; OVERLAY_SLOTS], |c| c.colors);
            st.frame.push_point(Vec3::from_array(position), colors);
        }
        Command::Line { start, end } => {
            let color = base_color(st, client);
            st.frame
                .push_line(Vec3::from_array(start), Vec3::from_array(end), color);
        }
        Command::Triangle { vertices } => {
            let color = base_color(st, client);
            st.frame
                .push_triangle(vertices.map(Vec3::from_array), color);
        }
        Command::Normal { origin, direction } => {
            let color = base_color(st, client);
            st.frame.push_normal(
                Vec3::from_array(origin),
                Vec3::from_array(direction),
                color,
            );
        }
        Command::SetColor { color } => {
            st.clients.entry(client).or_default().colors[0] = color;
        }
        Command::BindLabel { key, text } => {
            let id = st.interner.intern(&text);
            st.clients.entry(client).or_default().labels.insert(key, id);
        }
        Command::ColorByLabel { channel, key } => {
            // try_from rejects negative channels outright.
            let Ok(channel) = usize::try_from(channel) else {
                return out;
            };
            if channel >= LABEL_CHANNELS {
                return out;
            }
            let Some(state) = st.clients.get_mut(&client) else {
                return out;
            };
            let Some(&label) = state.labels.get(&key) else {
                return out;
            };
            let color = st.labels[channel].color_for(label);
            state.colors[channel + 1] = color;
        }
        Command::Clear => match st.sync.request_clear() {
            ClearDisposition::Immediate => st.frame.clear(false),
            ClearDisposition::Deferred => {
                out.pause_delivery = true;
                out.redraw = true;
            }
        },
        Command::Refresh => {
            st.sync.request_refresh();
            out.redraw = true;
        }
    }
    out
}

/// Current base color of `client`, or the default for an unknown client.
fn base_color(st: &HubState, client: ClientId) -> ColorRgb {
    st.clients.get(&client).map_or(DEFAULT_COLOR, |c| c.colors[0])
}
