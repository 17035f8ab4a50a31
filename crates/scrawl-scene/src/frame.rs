// SPDX-License-Identifier: Apache-2.0
//! The accumulating frame buffer: everything drawn since the last clear.

use glam::Vec3;

use crate::bounds::Bounds;
use crate::color::ColorRgb;
use crate::label::OVERLAY_SLOTS;

/// A point with its base color and per-channel overlay colors, all stamped
/// at append time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointVertex {
    /// Position in world space.
    pub position: Vec3,
    /// Slot 0 is the base color, slot `c + 1` the overlay for channel `c`.
    pub colors: [ColorRgb; OVERLAY_SLOTS],
}

/// Line segment primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// First endpoint.
    pub start: Vec3,
    /// Second endpoint.
    pub end: Vec3,
    /// Color stamped at append time.
    pub color: ColorRgb,
}

/// Filled triangle primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// Vertices in counter-clockwise order.
    pub vertices: [Vec3; 3],
    /// Color stamped at append time.
    pub color: ColorRgb,
}

/// Normal glyph: a direction vector drawn at an origin position.
///
/// Only the origin participates in the bounding box; the direction is not a
/// position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalGlyph {
    /// Position the glyph is anchored at.
    pub origin: Vec3,
    /// Direction vector (not necessarily normalized).
    pub direction: Vec3,
    /// Color stamped at append time.
    pub color: ColorRgb,
}

/// Which primitive list an appended object went to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Entry in the point list.
    Point,
    /// Entry in the line list.
    Line,
    /// Entry in the triangle list.
    Triangle,
    /// Entry in the normal list.
    Normal,
}

/// Per-kind counts of the objects inside the visible range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleRange {
    /// Points to draw, counted from the front of the point list.
    pub points: usize,
    /// Segments to draw.
    pub lines: usize,
    /// Triangles to draw.
    pub triangles: usize,
    /// Normal glyphs to draw.
    pub normals: usize,
}

/// The accumulating scene: ordered primitive lists plus running bounds.
///
/// Appends are O(1) amortized and update the bounds incrementally; the only
/// way geometry leaves the frame is a [`Frame::clear`].
#[derive(Debug, Default)]
pub struct Frame {
    points: Vec<PointVertex>,
    lines: Vec<Segment>,
    triangles: Vec<Triangle>,
    normals: Vec<NormalGlyph>,
    order: Vec<PrimitiveKind>,
    bounds: Bounds,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point carrying the full overlay color array.
    pub fn push_point(&mut self, position: Vec3, colors: [ColorRgb; OVERLAY_SLOTS]) {
        self.bounds.insert(position);
        self.points.push(PointVertex { position, colors });
        self.order.push(PrimitiveKind::Point);
    }

    /// Append a line segment.
    pub fn push_line(&mut self, start: Vec3, end: Vec3, color: ColorRgb) {
        self.bounds.insert(start);
        self.bounds.insert(end);
        self.lines.push(Segment { start, end, color });
        self.order.push(PrimitiveKind::Line);
    }

    /// Append a triangle.
    pub fn push_triangle(&mut self, vertices: [Vec3; 3], color: ColorRgb) {
        for v in vertices {
            self.bounds.insert(v);
        }
        self.triangles.push(Triangle { vertices, color });
        self.order.push(PrimitiveKind::Triangle);
    }

    /// Append a normal glyph anchored at `origin`.
    pub fn push_normal(&mut self, origin: Vec3, direction: Vec3, color: ColorRgb) {
        self.bounds.insert(origin);
        self.normals.push(NormalGlyph {
            origin,
            direction,
            color,
        });
        self.order.push(PrimitiveKind::Normal);
    }

    /// All appended points, oldest first.
    pub fn points(&self) -> &[PointVertex] {
        &self.points
    }

    /// All appended segments, oldest first.
    pub fn lines(&self) -> &[Segment] {
        &self.lines
    }

    /// All appended triangles, oldest first.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// All appended normal glyphs, oldest first.
    pub fn normals(&self) -> &[NormalGlyph] {
        &self.normals
    }

    /// Total number of appended objects across all kinds.
    pub fn object_count(&self) -> usize {
        self.order.len()
    }

    /// Running bounds over everything appended since the last reset.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Per-kind counts of the first `round(total * filter)` appended objects.
    ///
    /// `filter` is clamped to `[0, 1]`; the tail of the append order is what
    /// gets hidden, so lowering the fraction replays ingestion backwards.
    pub fn visible(&self, filter: f32) -> VisibleRange {
        let total = self.order.len();
        let cut = ((total as f32) * filter.clamp(0.0, 1.0)).round() as usize;
        let cut = cut.min(total);
        let mut range = VisibleRange::default();
        for kind in &self.order[..cut] {
            match kind {
                PrimitiveKind::Point => range.points += 1,
                PrimitiveKind::Line => range.lines += 1,
                PrimitiveKind::Triangle => range.triangles += 1,
                PrimitiveKind::Normal => range.normals += 1,
            }
        }
        range
    }

    /// Empty every primitive list. Resets the bounds only when asked; a
    /// lightweight clear keeps the last bounds so the view does not jump.
    pub fn clear(&mut self, reset_bounds: bool) {
        self.points.clear();
        self.lines.clear();
        self.triangles.clear();
        self.normals.clear();
        self.order.clear();
        if reset_bounds {
            self.bounds = Bounds::empty();
        }
    }

    /// Recompute the bounds from scratch over the current geometry and
    /// return them. Used to reseed after a clear; the incremental path must
    /// agree with this at all times.
    pub fn rescan_bounds(&mut self) -> Bounds {
        let mut bounds = Bounds::empty();
        for p in &self.points {
            bounds.insert(p.position);
        }
        for l in &self.lines {
            bounds.insert(l.start);
            bounds.insert(l.end);
        }
        for t in &self.triangles {
            for v in t.vertices {
                bounds.insert(v);
            }
        }
        for n in &self.normals {
            bounds.insert(n.origin);
        }
        self.bounds = bounds;
        bounds
    }
}
