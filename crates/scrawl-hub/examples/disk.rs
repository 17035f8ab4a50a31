// SPDX-License-Identifier: Apache-2.0
//! Sample producer: streams three sampled disks to a running hub.
//!
//! The three disks share angles but use radius, radius squared, and the
//! square root of the radius, which makes sampling bias obvious at a glance.
//!
//! ```sh
//! cargo run --example disk -- 127.0.0.1:10000 100000
//! ```

use std::f32::consts::TAU;
use std::io::{BufWriter, Write};
use std::net::TcpStream;

use anyhow::{Context, Result};
use rand::Rng;
use scrawl_proto::Command;

fn send(w: &mut impl Write, cmd: &Command) -> Result<()> {
    writeln!(w, "{}", cmd.encode())?;
    Ok(())
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let addr = args.next().unwrap_or_else(|| "127.0.0.1:10000".to_owned());
    let count: u32 = args
        .next()
        .map_or(Ok(100_000), |s| s.parse())
        .context("point count must be an integer")?;

    let stream = TcpStream::connect(&addr).with_context(|| format!("connecting to {addr}"))?;
    let mut w = BufWriter::new(stream);
    let mut rng = rand::thread_rng();

    send(&mut w, &Command::SetColor { color: [1.0, 0.0, 1.0] })?;
    for i in 0..count {
        let s0: f32 = rng.gen();
        let t = TAU * rng.gen::<f32>();

        for (z, r) in [(0.0, s0), (1.0, s0 * s0), (2.0, s0.sqrt())] {
            send(
                &mut w,
                &Command::Point {
                    position: [r * t.sin(), r * t.cos(), z],
                },
            )?;
        }
        if i % 10_000 == 0 {
            send(&mut w, &Command::Refresh)?;
        }
    }
    send(&mut w, &Command::Refresh)?;
    w.flush()?;
    Ok(())
}
