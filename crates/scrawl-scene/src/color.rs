// SPDX-License-Identifier: Apache-2.0
//! Color types and the deterministic label palette.

/// Linear RGB color triple.
pub type ColorRgb = [f32; 3];

/// Base draw color for a fresh client (white).
pub const DEFAULT_COLOR: ColorRgb = [1.0, 1.0, 1.0];

/// Deterministic palette for categorical label colors, indexed by the
/// first-seen ordinal of the label within its channel.
pub const PALETTE: [ColorRgb; 12] = [
    [0.89, 0.10, 0.11],
    [0.22, 0.49, 0.72],
    [0.30, 0.69, 0.29],
    [0.60, 0.31, 0.64],
    [1.00, 0.50, 0.00],
    [1.00, 1.00, 0.20],
    [0.65, 0.34, 0.16],
    [0.97, 0.51, 0.75],
    [0.60, 0.60, 0.60],
    [0.12, 0.71, 0.68],
    [0.70, 0.87, 0.41],
    [0.99, 0.75, 0.44],
];

/// Palette color for the `ordinal`-th distinct label, cycling past the end.
pub fn palette_color(ordinal: usize) -> ColorRgb {
    PALETTE[ordinal % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles() {
        assert_eq!(palette_color(0), PALETTE[0]);
        assert_eq!(palette_color(PALETTE.len()), PALETTE[0]);
        assert_eq!(palette_color(PALETTE.len() + 3), PALETTE[3]);
    }
}
