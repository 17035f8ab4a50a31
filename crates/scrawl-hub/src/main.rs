// SPDX-License-Identifier: Apache-2.0
//! Headless scrawl hub: accepts client streams and logs what each frame
//! would draw. Windowed frontends link `scrawl_hub` as a library and drive
//! [`Hub::render_frame_blocking`] from their own render thread instead.

use std::time::Duration;

use anyhow::Result;
use scrawl_hub::{FsPrefsStore, Hub, HubPrefs, PrefsStore};
use scrawl_scene::{FrameContext, NormalGlyph, PointVertex, RenderPort, Segment, Triangle};
use tokio::net::TcpListener;
use tracing::info;

/// Render port that only counts. Lets the hub run (and the sync protocol be
/// exercised) on machines with no display at all.
#[derive(Debug, Default)]
struct StatsPort {
    frames: u64,
}

impl RenderPort for StatsPort {
    fn begin_frame(&mut self, ctx: &FrameContext) {
        self.frames += 1;
        info!(
            frame = self.frames,
            points = ctx.visible.points,
            lines = ctx.visible.lines,
            triangles = ctx.visible.triangles,
            normals = ctx.visible.normals,
            center = ?ctx.center.to_array(),
            "frame"
        );
    }
    fn draw_points(&mut self, _points: &[PointVertex]) {}
    fn draw_lines(&mut self, _lines: &[Segment]) {}
    fn draw_triangles(&mut self, _triangles: &[Triangle]) {}
    fn draw_normals(&mut self, _normals: &[NormalGlyph]) {}
    fn end_frame(&mut self) {}
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Prefs (best-effort); persist defaults once if absent.
    let store = FsPrefsStore::new().ok();
    let prefs: HubPrefs = store
        .as_ref()
        .and_then(|s| s.load().ok().flatten())
        .unwrap_or_default();
    if let Some(store) = &store {
        let _ = store.save(&prefs);
    }

    let hub = Hub::new();
    hub.set_point_size(prefs.point_size).await;
    hub.set_filter(prefs.filter).await;

    let listener = TcpListener::bind(&prefs.listen_addr).await?;
    {
        let hub = hub.clone();
        tokio::spawn(async move {
            if let Err(err) = scrawl_hub::serve(listener, hub).await {
                tracing::error!(?err, "listener error");
            }
        });
    }

    // Draw on demand, capped at roughly 30 fps. A deferred clear posts a
    // redraw, so paused clients never wait longer than one tick.
    let mut port = StatsPort::default();
    let mut tick = tokio::time::interval(Duration::from_millis(33));
    loop {
        hub.redraw_requested().await;
        hub.render_frame(&mut port).await;
        tick.tick().await;
    }
}
