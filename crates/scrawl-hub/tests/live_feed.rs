// SPDX-License-Identifier: Apache-2.0
//! End-to-end tests over real TCP sockets.

use std::time::Duration;

use scrawl_hub::{serve, Hub};
use scrawl_scene::{FrameContext, NormalGlyph, PointVertex, RenderPort, Segment, Triangle};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{sleep, timeout};

async fn start_hub() -> (Hub, std::net::SocketAddr) {
    let hub = Hub::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let serve_hub = hub.clone();
    tokio::spawn(async move {
        let _ = serve(listener, serve_hub).await;
    });
    (hub, addr)
}

/// Poll until the hub holds exactly `n` objects or a second passes.
async fn wait_for_objects(hub: &Hub, n: usize) {
    timeout(Duration::from_secs(1), async {
        while hub.object_count().await != n {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("object count not reached in time");
}

/// Poll until channel 0 has at least one legend row or a second passes.
async fn wait_for_legend(hub: &Hub) {
    timeout(Duration::from_secs(1), async {
        while hub.legend(0).await.is_empty() {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("legend not populated in time");
}

/// Poll until delivery pauses or a second passes.
async fn wait_for_pause(hub: &Hub) {
    timeout(Duration::from_secs(1), async {
        while hub.delivery_open() {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("delivery did not pause in time");
}

#[derive(Debug, Default)]
struct CountingPort {
    points_drawn: usize,
}

impl RenderPort for CountingPort {
    fn begin_frame(&mut self, _ctx: &FrameContext) {
        self.points_drawn = 0;
    }
    fn draw_points(&mut self, points: &[PointVertex]) {
        self.points_drawn += points.len();
    }
    fn draw_lines(&mut self, _lines: &[Segment]) {}
    fn draw_triangles(&mut self, _triangles: &[Triangle]) {}
    fn draw_normals(&mut self, _normals: &[NormalGlyph]) {}
    fn end_frame(&mut self) {}
}

#[tokio::test]
async fn two_clients_accumulate_into_one_frame() {
    let (hub, addr) = start_hub().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();
    a.write_all(b"c 1 0 0\np 0 0 0\np 1 1 1\n").await.unwrap();
    b.write_all(b"p 2 2 2\n").await.unwrap();

    wait_for_objects(&hub, 3).await;
}

#[tokio::test]
async fn labels_converge_across_clients() {
    let (hub, addr) = start_hub().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();
    // Different local keys, same label text.
    a.write_all(b"s 1 obstacle\ng 0 1\n").await.unwrap();
    b.write_all(b"s 42 obstacle\ng 0 42\n").await.unwrap();

    wait_for_legend(&hub).await;
    // One legend row, not two: both keys resolved to the same label.
    sleep(Duration::from_millis(20)).await;
    let legend = hub.legend(0).await;
    assert_eq!(legend.len(), 1);
    assert_eq!(legend[0].text, "obstacle");
}

#[tokio::test]
async fn deferred_clear_pauses_the_socket_until_a_frame_draws() {
    let (hub, addr) = start_hub().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    a.write_all(b"p 0 0 0\np 1 1 1\nr\nf\np 9 9 9\n").await.unwrap();

    // The clear defers behind the refresh and delivery pauses; the trailing
    // point must not land yet.
    wait_for_pause(&hub).await;
    assert_eq!(hub.object_count().await, 2);

    let mut port = CountingPort::default();
    hub.render_frame(&mut port).await;
    assert_eq!(port.points_drawn, 2);

    // Post-draw: clear applied, gate open, the buffered point flows in.
    assert!(hub.delivery_open());
    wait_for_objects(&hub, 1).await;
}

#[tokio::test]
async fn disconnect_leaves_shared_state_intact() {
    let (hub, addr) = start_hub().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    a.write_all(b"s 1 wall\ng 0 1\np 5 5 5\n").await.unwrap();
    wait_for_objects(&hub, 1).await;

    a.shutdown().await.unwrap();
    drop(a);
    sleep(Duration::from_millis(20)).await;

    assert_eq!(hub.object_count().await, 1);
    assert_eq!(hub.legend(0).await.len(), 1);
}
