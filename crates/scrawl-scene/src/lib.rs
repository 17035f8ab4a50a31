// SPDX-License-Identifier: Apache-2.0
//! Scene-side domain types for the scrawl debug visualizer.
//!
//! This crate holds the accumulating frame buffer, the label/color machinery,
//! and the [`RenderPort`] contract an external renderer implements. It does
//! no I/O: ingestion and synchronization live in `scrawl-hub`.
//!
//! # Design Principles
//!
//! - **Primitives are immutable** — every appended point/line/triangle/normal
//!   carries the color it was stamped with; later color-table edits never
//!   touch it. Only a clear removes geometry.
//! - **Renderers are dumb** — the hub decides what is visible and when a
//!   frame happens; a [`RenderPort`] adapter just draws what it is handed.

mod bounds;
mod color;
mod frame;
mod intern;
mod label;
mod port;

pub use bounds::Bounds;
pub use color::{palette_color, ColorRgb, DEFAULT_COLOR, PALETTE};
pub use frame::{Frame, NormalGlyph, PointVertex, PrimitiveKind, Segment, Triangle, VisibleRange};
pub use intern::{Interner, LabelId};
pub use label::{LabelTable, LABEL_CHANNELS, OVERLAY_SLOTS};
pub use port::{FrameContext, RenderPort};
