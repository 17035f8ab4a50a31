// SPDX-License-Identifier: Apache-2.0
//! Multi-client ingestion and render synchronization for the scrawl
//! debug visualizer.
//!
//! Clients connect over TCP and stream newline-delimited text commands
//! that accumulate geometry into a shared [`scrawl_scene::Frame`]. The
//! [`Hub`] interprets commands under one lock, runs the refresh/clear
//! synchronization protocol, and drives any [`scrawl_scene::RenderPort`]
//! one frame at a time. Nothing in this crate touches a GPU.

pub mod config;
pub mod gate;
pub mod hub;
pub mod interp;
pub mod server;
pub mod state;
pub mod sync;

pub use config::{ConfigError, FsPrefsStore, HubPrefs, PrefsStore};
pub use gate::DeliveryGate;
pub use hub::{Hub, LegendRow};
pub use server::serve;
pub use state::{ClientId, ClientState, HubState, ViewSettings};
pub use sync::{ClearDisposition, SyncState};
