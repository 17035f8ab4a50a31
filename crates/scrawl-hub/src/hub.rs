// SPDX-License-Identifier: Apache-2.0
//! The hub: one shared handle tying ingestion, state, and rendering together.
//!
//! Cloning a [`Hub`] is cheap; connection tasks, the windowing layer, and
//! the render loop all hold clones of the same handle. The state lock plus
//! the delivery gate are the only synchronization: while delivery is paused,
//! the renderer is the sole mutator, and while a command is being applied,
//! the lock keeps the renderer out.

use std::sync::Arc;

use scrawl_proto::decode_line;
use scrawl_scene::{ColorRgb, FrameContext, RenderPort, LABEL_CHANNELS};
use tokio::sync::{Mutex, Notify};
use tracing::{debug, warn};

use crate::gate::DeliveryGate;
use crate::interp;
use crate::state::{ClientId, HubState};

/// One row of the legend for a label channel.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendRow {
    /// Label text as the client sent it.
    pub text: String,
    /// Color assigned to the label in this channel.
    pub color: ColorRgb,
}

/// Shared handle to the ingestion-and-synchronization core.
#[derive(Clone, Debug, Default)]
pub struct Hub {
    state: Arc<Mutex<HubState>>,
    gate: DeliveryGate,
    redraw: Arc<Notify>,
}

impl Hub {
    /// Create an empty hub with delivery enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client connection and return its id.
    pub async fn connect(&self) -> ClientId {
        self.state.lock().await.register_client()
    }

    /// Tear down a connection's per-client state. Shared geometry and label
    /// tables are untouched; other clients never notice.
    pub async fn disconnect(&self, id: ClientId) {
        self.state.lock().await.remove_client(id);
    }

    /// Deliver one raw line from a client.
    ///
    /// Parks while delivery is paused, so per-connection order is preserved
    /// across a pause/resume boundary. Malformed lines are logged and
    /// dropped; they never fail the connection.
    pub async fn deliver_line(&self, id: ClientId, line: &str) {
        self.gate.wait_open().await;
        let cmd = match decode_line(line) {
            Ok(cmd) => cmd,
            Err(err) => {
                warn!(client = id.0, %err, "ignoring malformed command");
                return;
            }
        };
        let mut st = self.state.lock().await;
        let outcome = interp::apply(&mut st, id, cmd);
        if outcome.pause_delivery {
            // Pause before releasing the lock so no other task can slip a
            // command in between the deferred clear and the gate closing.
            self.gate.pause();
            debug!(client = id.0, "clear deferred; delivery paused until next frame");
        }
        drop(st);
        if outcome.redraw {
            self.redraw.notify_one();
        }
    }

    /// Drive one displayed frame through `port`.
    ///
    /// Captures bounds if a refresh is pending, hands the visible prefix of
    /// each primitive list to the port, then reconciles a deferred clear and
    /// resumes delivery. Async flavor for render loops living on the
    /// runtime; external render threads use
    /// [`Hub::render_frame_blocking`].
    pub async fn render_frame(&self, port: &mut dyn RenderPort) {
        let mut st = self.state.lock().await;
        self.render_locked(&mut st, port);
    }

    /// Blocking flavor of [`Hub::render_frame`] for a dedicated render
    /// thread. Must not be called from inside the async runtime.
    pub fn render_frame_blocking(&self, port: &mut dyn RenderPort) {
        let mut st = self.state.blocking_lock();
        self.render_locked(&mut st, port);
    }

    fn render_locked(&self, st: &mut HubState, port: &mut dyn RenderPort) {
        if st.sync.take_refresh() {
            // Full rescan on refresh: after a clear this reseeds the bounds
            // from whatever geometry is actually left.
            st.captured_bounds = st.frame.rescan_bounds();
            debug!(objects = st.frame.object_count(), "refresh captured");
        }

        let visible = st.frame.visible(st.view.filter);
        let bounds = st.captured_bounds;
        let ctx = FrameContext {
            bounds,
            center: bounds.center(),
            scale: 5.0 / bounds.diagonal(),
            visible,
            color_slot: st.view.color_slot(),
            point_size: st.view.point_size,
        };
        port.begin_frame(&ctx);
        port.draw_points(&st.frame.points()[..visible.points]);
        port.draw_lines(&st.frame.lines()[..visible.lines]);
        port.draw_triangles(&st.frame.triangles()[..visible.triangles]);
        port.draw_normals(&st.frame.normals()[..visible.normals]);
        port.end_frame();

        if st.sync.take_deferred_clear() {
            // The frame above drew the pre-clear geometry; it is now safe
            // to drop it and let buffered commands flow again.
            st.frame.clear(false);
            self.gate.resume();
            debug!("deferred clear applied; delivery resumed");
        }
    }

    /// Full reset from the windowing layer: geometry, bounds, and every
    /// label table. Per-client key bindings and the interner survive.
    pub async fn reset(&self) {
        let mut st = self.state.lock().await;
        st.frame.clear(true);
        for table in &mut st.labels {
            table.clear();
        }
        st.sync.request_refresh();
        drop(st);
        self.redraw.notify_one();
    }

    /// Request a refresh on behalf of the windowing layer.
    pub async fn request_refresh(&self) {
        self.state.lock().await.sync.request_refresh();
        self.redraw.notify_one();
    }

    /// Set the visibility filter fraction (clamped at use).
    pub async fn set_filter(&self, filter: f32) {
        self.state.lock().await.view.filter = filter;
        self.redraw.notify_one();
    }

    /// Select which color slot points draw with (0 = base colors,
    /// `c + 1` = channel `c` overlays).
    pub async fn set_color_by(&self, color_by: usize) {
        self.state.lock().await.view.color_by = color_by;
        self.redraw.notify_one();
    }

    /// Set the point sprite size.
    pub async fn set_point_size(&self, point_size: f32) {
        self.state.lock().await.view.point_size = point_size;
    }

    /// Legend rows for `channel`, in first-seen order. Empty when the
    /// channel index is out of range.
    pub async fn legend(&self, channel: usize) -> Vec<LegendRow> {
        let st = self.state.lock().await;
        if channel >= LABEL_CHANNELS {
            return Vec::new();
        }
        st.labels[channel]
            .entries()
            .map(|(id, color)| LegendRow {
                text: st.interner.resolve(id).unwrap_or_default().to_owned(),
                color,
            })
            .collect()
    }

    /// Wait for the next redraw request (posted by refresh, deferred clear,
    /// reset, and view changes). The windowing layer awaits this to schedule
    /// a draw instead of polling.
    pub async fn redraw_requested(&self) {
        self.redraw.notified().await;
    }

    /// Whether delivery is currently enabled. Mostly for tests and
    /// diagnostics.
    pub fn delivery_open(&self) -> bool {
        self.gate.is_open()
    }

    /// Total objects accumulated so far.
    pub async fn object_count(&self) -> usize {
        self.state.lock().await.frame.object_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrawl_scene::{NormalGlyph, PointVertex, Segment, Triangle, VisibleRange};
    use std::time::Duration;
    use tokio::time::timeout;

    /// Records what each frame drew; no GPU anywhere near it.
    #[derive(Debug, Default)]
    struct RecordingPort {
        frames: Vec<RecordedFrame>,
    }

    #[derive(Debug, Clone)]
    struct RecordedFrame {
        visible: VisibleRange,
        bounds_min: [f32; 3],
        bounds_max: [f32; 3],
        points: Vec<PointVertex>,
    }

    impl RenderPort for RecordingPort {
        fn begin_frame(&mut self, ctx: &FrameContext) {
            self.frames.push(RecordedFrame {
                visible: ctx.visible,
                bounds_min: ctx.bounds.min().to_array(),
                bounds_max: ctx.bounds.max().to_array(),
                points: Vec::new(),
            });
        }
        fn draw_points(&mut self, points: &[PointVertex]) {
            if let Some(frame) = self.frames.last_mut() {
                frame.points.extend_from_slice(points);
            }
        }
        fn draw_lines(&mut self, _lines: &[Segment]) {}
        fn draw_triangles(&mut self, _triangles: &[Triangle]) {}
        fn draw_normals(&mut self, _normals: &[NormalGlyph]) {}
        fn end_frame(&mut self) {}
    }

    async fn feed(hub: &Hub, id: ClientId, lines: &[&str]) {
        for line in lines {
            hub.deliver_line(id, line).await;
        }
    }

    #[tokio::test]
    async fn draw_between_append_and_clear_sees_the_geometry() {
        let hub = Hub::new();
        let a = hub.connect().await;
        feed(&hub, a, &["c 1 0 0", "p 1 2 3", "p 4 5 6", "r", "f"]).await;

        // The clear was deferred and delivery paused.
        assert!(!hub.delivery_open());
        assert_eq!(hub.object_count().await, 2);

        let mut port = RecordingPort::default();
        hub.render_frame(&mut port).await;

        // The draw saw both red points and the refreshed bounds.
        let frame = &port.frames[0];
        assert_eq!(frame.visible.points, 2);
        assert_eq!(frame.points.len(), 2);
        assert!(frame.points.iter().all(|p| p.colors[0] == [1.0, 0.0, 0.0]));
        assert_eq!(frame.bounds_min, [1.0, 2.0, 3.0]);
        assert_eq!(frame.bounds_max, [4.0, 5.0, 6.0]);

        // Post-draw the clear landed and delivery is open again.
        assert!(hub.delivery_open());
        assert_eq!(hub.object_count().await, 0);

        // The next frame draws nothing but keeps the captured bounds.
        hub.render_frame(&mut port).await;
        let frame = &port.frames[1];
        assert_eq!(frame.visible.points, 0);
        assert_eq!(frame.bounds_min, [1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn paused_delivery_replays_after_the_draw() {
        let hub = Hub::new();
        let a = hub.connect().await;
        feed(&hub, a, &["p 0 0 0", "r", "f"]).await;
        assert!(!hub.delivery_open());

        // A command arriving while paused parks instead of landing.
        let late = {
            let hub = hub.clone();
            tokio::spawn(async move {
                hub.deliver_line(a, "p 9 9 9").await;
            })
        };
        tokio::task::yield_now().await;
        assert!(!late.is_finished());
        assert_eq!(hub.object_count().await, 1);

        let mut port = RecordingPort::default();
        hub.render_frame(&mut port).await;
        assert_eq!(port.frames[0].points.len(), 1);

        // Resume flushed the parked command.
        timeout(Duration::from_secs(1), late).await.unwrap().unwrap();
        assert_eq!(hub.object_count().await, 1);
        hub.render_frame(&mut port).await;
        assert_eq!(port.frames[1].points[0].position.to_array(), [9.0, 9.0, 9.0]);
    }

    #[tokio::test]
    async fn clear_without_refresh_applies_immediately() {
        let hub = Hub::new();
        let a = hub.connect().await;
        feed(&hub, a, &["p 1 2 3", "f"]).await;
        assert!(hub.delivery_open());
        assert_eq!(hub.object_count().await, 0);
    }

    #[tokio::test]
    async fn reset_wipes_labels_and_geometry() {
        let hub = Hub::new();
        let a = hub.connect().await;
        feed(&hub, a, &["s 1 cat", "g 0 1", "p 0 0 0"]).await;
        assert_eq!(hub.legend(0).await.len(), 1);

        hub.reset().await;
        assert_eq!(hub.object_count().await, 0);
        assert!(hub.legend(0).await.is_empty());

        // Reset posts a refresh; the next frame reseeds empty bounds.
        let mut port = RecordingPort::default();
        hub.render_frame(&mut port).await;
        assert_eq!(port.frames[0].visible, VisibleRange::default());
    }

    #[tokio::test]
    async fn legend_resolves_text_in_first_seen_order() {
        let hub = Hub::new();
        let a = hub.connect().await;
        feed(
            &hub,
            a,
            &["s 1 walls", "s 2 floor", "g 0 2", "g 0 1", "g 1 1"],
        )
        .await;
        let legend = hub.legend(0).await;
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].text, "floor");
        assert_eq!(legend[1].text, "walls");
        assert_eq!(hub.legend(1).await.len(), 1);
        assert!(hub.legend(99).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_lines_are_dropped_without_side_effects() {
        let hub = Hub::new();
        let a = hub.connect().await;
        feed(&hub, a, &["p 1 2", "q 1 2 3", "", "s nokey"]).await;
        assert_eq!(hub.object_count().await, 0);
        assert!(hub.delivery_open());
    }

    #[tokio::test]
    async fn filter_fraction_trims_the_tail() {
        let hub = Hub::new();
        let a = hub.connect().await;
        feed(&hub, a, &["p 0 0 0", "p 1 1 1", "p 2 2 2", "p 3 3 3"]).await;
        hub.set_filter(0.5).await;

        let mut port = RecordingPort::default();
        hub.render_frame(&mut port).await;
        assert_eq!(port.frames[0].points.len(), 2);
        assert_eq!(port.frames[0].points[1].position.to_array(), [1.0, 1.0, 1.0]);
    }
}
