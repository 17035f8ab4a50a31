// SPDX-License-Identifier: Apache-2.0
//! Line decoding: one [`Command`] per text line.

use thiserror::Error;

use crate::Command;

/// Why a command line failed to decode.
///
/// Every variant is recoverable: the hub logs it and drops the line without
/// touching any state. Nothing here terminates a connection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line carried no command byte.
    #[error("empty command line")]
    Empty,
    /// The first byte is not a known command.
    #[error("unknown command byte `{0}`")]
    UnknownCommand(char),
    /// A numeric command had too few or unparsable float fields.
    #[error("command `{opcode}` expected {expected} numeric fields, got {found}")]
    BadFields {
        /// Command byte of the offending line.
        opcode: char,
        /// Fields the command requires.
        expected: usize,
        /// Fields that parsed before the failure.
        found: usize,
    },
    /// An `s` line without an unsigned integer key or without a payload.
    #[error("malformed label binding")]
    MalformedLabel,
}

/// Decode one wire line into a [`Command`].
///
/// Trailing `\r`/`\n` bytes are tolerated so callers can hand over raw
/// buffered lines.
pub fn decode_line(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut chars = line.chars();
    let opcode = chars.next().ok_or(ParseError::Empty)?;
    let rest = chars.as_str();
    match opcode {
        'p' => Ok(Command::Point {
            position: read_floats::<3>(opcode, rest)?,
        }),
        'l' => {
            let [x1, y1, z1, x2, y2, z2] = read_floats::<6>(opcode, rest)?;
            Ok(Command::Line {
                start: [x1, y1, z1],
                end: [x2, y2, z2],
            })
        }
        't' => {
            let [x1, y1, z1, x2, y2, z2, x3, y3, z3] = read_floats::<9>(opcode, rest)?;
            Ok(Command::Triangle {
                vertices: [[x1, y1, z1], [x2, y2, z2], [x3, y3, z3]],
            })
        }
        'n' => {
            let [x, y, z, dx, dy, dz] = read_floats::<6>(opcode, rest)?;
            Ok(Command::Normal {
                origin: [x, y, z],
                direction: [dx, dy, dz],
            })
        }
        'c' => Ok(Command::SetColor {
            color: read_floats::<3>(opcode, rest)?,
        }),
        's' => decode_bind_label(rest),
        'g' => {
            // Producers emit these as floats; keep that tolerance and
            // truncate to integers. The cast stays signed so a negative
            // channel survives to the range check downstream instead of
            // wrapping into a valid index.
            let [channel, key] = read_floats::<2>(opcode, rest)?;
            Ok(Command::ColorByLabel {
                channel: channel as i32,
                key: key as i32,
            })
        }
        'f' => Ok(Command::Clear),
        'r' => Ok(Command::Refresh),
        other => Err(ParseError::UnknownCommand(other)),
    }
}

/// Parse exactly `N` whitespace-separated floats from `rest`.
fn read_floats<const N: usize>(opcode: char, rest: &str) -> Result<[f32; N], ParseError> {
    let mut out = [0.0_f32; N];
    let mut fields = rest.split_whitespace();
    for (found, slot) in out.iter_mut().enumerate() {
        let field = fields.next().ok_or(ParseError::BadFields {
            opcode,
            expected: N,
            found,
        })?;
        *slot = field.parse().map_err(|_| ParseError::BadFields {
            opcode,
            expected: N,
            found,
        })?;
    }
    Ok(out)
}

/// `s` payload: an integer key (possibly negative), one separator byte,
/// then verbatim text.
fn decode_bind_label(rest: &str) -> Result<Command, ParseError> {
    let trimmed = rest.trim_start();
    let sign = usize::from(trimmed.starts_with('-'));
    let digits = trimmed[sign..]
        .chars()
        .take_while(char::is_ascii_digit)
        .count();
    if digits == 0 {
        return Err(ParseError::MalformedLabel);
    }
    let end = sign + digits;
    let key: i32 = trimmed[..end]
        .parse()
        .map_err(|_| ParseError::MalformedLabel)?;
    // There must be at least a separator char after the key; the text is
    // everything after it, untouched.
    let mut after_key = trimmed[end..].chars();
    if after_key.next().is_none() {
        return Err(ParseError::MalformedLabel);
    }
    let text = after_key.as_str().to_owned();
    Ok(Command::BindLabel { key, text })
}
