// SPDX-License-Identifier: Apache-2.0
//! Render port: the contract between the hub and an external renderer.

use glam::Vec3;

use crate::bounds::Bounds;
use crate::frame::{NormalGlyph, PointVertex, Segment, Triangle, VisibleRange};

/// Per-frame context captured by the hub before any draw call.
///
/// `bounds` is the box captured at the last refresh, not necessarily the
/// running bounds, so a draw between refreshes keeps a stable framing.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    /// Bounds captured at the last refresh.
    pub bounds: Bounds,
    /// Center of the captured bounds.
    pub center: Vec3,
    /// Uniform scale normalizing the captured bounds into view space.
    pub scale: f32,
    /// Per-kind visible counts for this frame; the slices handed to the
    /// draw calls are already limited to these.
    pub visible: VisibleRange,
    /// Color slot to draw points with (0 = base, `c + 1` = channel `c`).
    pub color_slot: usize,
    /// Point sprite size in pixels.
    pub point_size: f32,
}

/// Contract an external renderer implements to draw one frame.
///
/// Implementors receive primitive slices and draw them; they own no domain
/// logic and no timing. The hub decides what is visible and when a frame
/// happens, and guarantees that no ingestion mutates the slices while a
/// frame is in flight.
pub trait RenderPort {
    /// Called once at the start of each displayed frame.
    fn begin_frame(&mut self, ctx: &FrameContext);

    /// Draw the visible prefix of the point list.
    fn draw_points(&mut self, points: &[PointVertex]);

    /// Draw the visible prefix of the segment list.
    fn draw_lines(&mut self, lines: &[Segment]);

    /// Draw the visible prefix of the triangle list.
    fn draw_triangles(&mut self, triangles: &[Triangle]);

    /// Draw the visible prefix of the normal glyph list.
    fn draw_normals(&mut self, normals: &[NormalGlyph]);

    /// Called once after all draw calls for the frame.
    fn end_frame(&mut self);
}
