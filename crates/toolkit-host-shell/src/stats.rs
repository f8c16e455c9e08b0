// SPDX-License-Identifier: AGPL-3.0
// Toolkit Host Shell - Frame statistics observer

use std::sync::atomic::{AtomicU64, Ordering};
use toolkit_host_core::FrameTickObserver;

/// Counts frames and accumulated frame time across a toolkit run.
///
/// Ticks may arrive from the toolkit's own run-loop thread, so the counters
/// are atomics; no other shared state is touched from the callback.
#[derive(Debug, Default)]
pub struct FrameStats {
    frames: AtomicU64,
    total_elapsed_ms: AtomicU64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Average frame time in milliseconds, or zero before the first tick.
    pub fn average_frame_ms(&self) -> f64 {
        let frames = self.frames();
        if frames == 0 {
            return 0.0;
        }
        self.total_elapsed_ms.load(Ordering::Relaxed) as f64 / frames as f64
    }

    pub fn log_summary(&self) {
        tracing::info!(
            "Toolkit ran {} frames, {:.1} ms/frame average",
            self.frames(),
            self.average_frame_ms()
        );
    }
}

impl FrameTickObserver for FrameStats {
    fn on_tick(&self, elapsed_ms: u32) {
        self.frames.fetch_add(1, Ordering::Relaxed);
        self.total_elapsed_ms
            .fetch_add(u64::from(elapsed_ms), Ordering::Relaxed);
    }
}
