// SPDX-License-Identifier: Apache-2.0
//! Text wire protocol for the scrawl hub.
//!
//! One command per line. The first byte selects the command and the rest of
//! the line is whitespace-separated decimal float fields, with a fixed count
//! per command — except `s`, whose payload is `<integer-key> <free text>`
//! with the text taken verbatim after the first separator byte (it may
//! contain spaces).
//!
//! Decoding is all-or-nothing: a line either becomes a [`Command`] or a
//! [`ParseError`], so a malformed line can never apply partial numeric
//! state downstream.

mod line;

pub use line::{decode_line, ParseError};

/// A single decoded client command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `p x y z` — append a point.
    Point {
        /// Position of the point.
        position: [f32; 3],
    },
    /// `l x1 y1 z1 x2 y2 z2` — append a line segment.
    Line {
        /// First endpoint.
        start: [f32; 3],
        /// Second endpoint.
        end: [f32; 3],
    },
    /// `t x1 y1 z1 … x3 y3 z3` — append a triangle.
    Triangle {
        /// The three vertices.
        vertices: [[f32; 3]; 3],
    },
    /// `n ox oy oz dx dy dz` — append a normal glyph at an origin.
    Normal {
        /// Anchor position.
        origin: [f32; 3],
        /// Direction vector.
        direction: [f32; 3],
    },
    /// `c r g b` — set the client's current base color.
    SetColor {
        /// New base color for subsequent appends from this client.
        color: [f32; 3],
    },
    /// `s key text` — intern `text` under the client-local `key`.
    BindLabel {
        /// Client-chosen small integer key; may be negative.
        key: i32,
        /// Label text, verbatim.
        text: String,
    },
    /// `g channel key` — color subsequent points by the label bound to `key`.
    ColorByLabel {
        /// Label channel index. Negative values are out of range and the
        /// command is a no-op downstream.
        channel: i32,
        /// Client-local key previously bound with `s`.
        key: i32,
    },
    /// `f` — clear accumulated geometry (bounds kept).
    Clear,
    /// `r` — ask the renderer to recapture scene state on its next frame.
    Refresh,
}

impl Command {
    /// First byte this command occupies on the wire.
    pub fn opcode(&self) -> char {
        match self {
            Command::Point { .. } => 'p',
            Command::Line { .. } => 'l',
            Command::Triangle { .. } => 't',
            Command::Normal { .. } => 'n',
            Command::SetColor { .. } => 'c',
            Command::BindLabel { .. } => 's',
            Command::ColorByLabel { .. } => 'g',
            Command::Clear => 'f',
            Command::Refresh => 'r',
        }
    }

    /// Canonical wire line for this command, without the trailing newline.
    pub fn encode(&self) -> String {
        match self {
            Command::Point { position: [x, y, z] } => format!("p {x} {y} {z}"),
            Command::Line {
                start: [x1, y1, z1],
                end: [x2, y2, z2],
            } => format!("l {x1} {y1} {z1} {x2} {y2} {z2}"),
            Command::Triangle {
                vertices: [[x1, y1, z1], [x2, y2, z2], [x3, y3, z3]],
            } => format!("t {x1} {y1} {z1} {x2} {y2} {z2} {x3} {y3} {z3}"),
            Command::Normal {
                origin: [x, y, z],
                direction: [dx, dy, dz],
            } => format!("n {x} {y} {z} {dx} {dy} {dz}"),
            Command::SetColor { color: [r, g, b] } => format!("c {r} {g} {b}"),
            Command::BindLabel { key, text } => format!("s {key} {text}"),
            Command::ColorByLabel { channel, key } => format!("g {channel} {key}"),
            Command::Clear => String::from("f"),
            Command::Refresh => String::from("r"),
        }
    }
}
