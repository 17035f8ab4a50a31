// SPDX-License-Identifier: Apache-2.0
//! TCP listener: one spawned task per client connection.
//!
//! The protocol is plain newline-delimited text, so there is no framing
//! state beyond the line buffer. Each task reads one line at a time and
//! hands it to the hub; the delivery gate inside the hub is what parks the
//! task during a deferred clear while unread bytes wait in socket buffers.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::hub::Hub;

/// Accept connections on `listener` forever, feeding every line into `hub`.
///
/// The caller picks the bind address (and port 0 tricks for tests) by
/// binding the listener itself.
pub async fn serve(listener: TcpListener, hub: Hub) -> Result<()> {
    info!("listening on {}", listener.local_addr()?);
    loop {
        let (stream, peer) = listener.accept().await?;
        let hub = hub.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_client(stream, hub).await {
                warn!(%peer, ?err, "client handler error");
            }
        });
    }
}

async fn handle_client(stream: TcpStream, hub: Hub) -> Result<()> {
    let id = hub.connect().await;
    debug!(client = id.0, "client connected");

    let mut reader = BufReader::new(stream);
    let mut buf = Vec::with_capacity(256);
    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf).await?;
        if n == 0 {
            break;
        }
        if buf.last() != Some(&b'\n') {
            // EOF mid-line; never execute a partial command.
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        hub.deliver_line(id, &line).await;
    }

    hub.disconnect(id).await;
    debug!(client = id.0, "client disconnected");
    Ok(())
}
