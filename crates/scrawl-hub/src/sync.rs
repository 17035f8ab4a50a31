// SPDX-License-Identifier: Apache-2.0
//! Render/sync state machine: two flags that keep a clear from destroying
//! geometry the renderer has not yet drawn.
//!
//! The machine cycles Idle → RefreshRequested → (optionally a paused,
//! deferred clear) → Idle. A clear that arrives while a refresh is pending
//! is recorded, not executed; the caller pauses delivery so nothing else can
//! touch the frame until the refresh's draw has happened. That makes the
//! observable behavior deterministic: every refresh sees the geometry
//! accumulated up to its request, and every clear takes effect only after
//! that draw.

/// What the interpreter should do with an incoming clear request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearDisposition {
    /// No refresh outstanding: clear the geometry now.
    Immediate,
    /// A refresh is outstanding: defer the clear until after its draw and
    /// pause delivery for all clients.
    Deferred,
}

/// The two-flag machine. At most one refresh and one clear are tracked at a
/// time; a clear requested while one is already deferred coalesces into it.
/// Two independent clients can legally race their clears past the delivery
/// gate before the pause lands, so a repeat must be harmless, not a bug.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncState {
    refresh_pending: bool,
    clear_pending: bool,
}

impl SyncState {
    /// Start in Idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a refresh request from a client or the windowing layer.
    pub fn request_refresh(&mut self) {
        self.refresh_pending = true;
    }

    /// Route a clear request. A clear arriving while one is already
    /// deferred stays deferred; both resolve in the same post-draw step.
    pub fn request_clear(&mut self) -> ClearDisposition {
        if self.refresh_pending || self.clear_pending {
            self.clear_pending = true;
            ClearDisposition::Deferred
        } else {
            ClearDisposition::Immediate
        }
    }

    /// True when the renderer must recapture scene state this frame.
    /// Consumes the flag.
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh_pending)
    }

    /// True when a deferred clear must run now that the frame has drawn.
    /// Consumes the flag.
    pub fn take_deferred_clear(&mut self) -> bool {
        std::mem::take(&mut self.clear_pending)
    }

    /// A refresh is waiting for the next frame.
    pub fn refresh_pending(&self) -> bool {
        self.refresh_pending
    }

    /// A clear is waiting for the current frame to finish drawing.
    pub fn clear_pending(&self) -> bool {
        self.clear_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_in_idle_is_immediate() {
        let mut sync = SyncState::new();
        assert_eq!(sync.request_clear(), ClearDisposition::Immediate);
        assert!(!sync.clear_pending());
    }

    #[test]
    fn clear_after_refresh_is_deferred() {
        let mut sync = SyncState::new();
        sync.request_refresh();
        assert_eq!(sync.request_clear(), ClearDisposition::Deferred);
        assert!(sync.clear_pending());
        assert!(sync.refresh_pending());
    }

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut sync = SyncState::new();
        sync.request_refresh();
        assert_eq!(sync.request_clear(), ClearDisposition::Deferred);

        // Frame start: capture happens, refresh flag drops.
        assert!(sync.take_refresh());
        assert!(!sync.take_refresh());

        // Post-draw: deferred clear runs once.
        assert!(sync.take_deferred_clear());
        assert!(!sync.take_deferred_clear());
        assert_eq!(sync, SyncState::new());
    }

    #[test]
    fn repeated_clear_while_deferred_coalesces() {
        let mut sync = SyncState::new();
        sync.request_refresh();
        assert_eq!(sync.request_clear(), ClearDisposition::Deferred);
        // A second client's clear racing in is an idempotent repeat, even
        // after the frame has already captured.
        assert_eq!(sync.request_clear(), ClearDisposition::Deferred);
        assert!(sync.take_refresh());
        assert_eq!(sync.request_clear(), ClearDisposition::Deferred);
        // One deferred clear resolves, not a queue of them.
        assert!(sync.take_deferred_clear());
        assert!(!sync.take_deferred_clear());
    }

    #[test]
    fn clear_after_capture_but_before_post_draw_stays_deferred() {
        // The refresh flag drops at frame start; a clear deferred earlier
        // must still wait for the post-draw step of that same frame.
        let mut sync = SyncState::new();
        sync.request_refresh();
        sync.request_clear();
        assert!(sync.take_refresh());
        assert!(sync.clear_pending());
    }
}
