// SPDX-License-Identifier: AGPL-3.0
// Toolkit Host Core - Frame-tick observer capability
//
// The toolkit invokes the host once per rendered frame with the elapsed
// time since the previous frame. Invocations are sequential but may come
// from the toolkit's own run-loop thread, so implementations must be
// Send + Sync and must not assume same-thread affinity with the caller
// of the bridge.

use std::sync::Mutex;

/// Host-supplied capability invoked once per rendered frame.
pub trait FrameTickObserver: Send + Sync {
    /// Called with the elapsed time since the previous frame, in
    /// milliseconds. Invoked zero or more times for the lifetime of a
    /// single toolkit run; no two invocations overlap.
    fn on_tick(&self, elapsed_ms: u32);
}

impl<F> FrameTickObserver for F
where
    F: Fn(u32) + Send + Sync,
{
    fn on_tick(&self, elapsed_ms: u32) {
        self(elapsed_ms)
    }
}

/// Observer that ignores every tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FrameTickObserver for NoopObserver {
    fn on_tick(&self, _elapsed_ms: u32) {}
}

/// Observer that records every elapsed-time argument it receives.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    ticks: Mutex<Vec<u32>>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded elapsed times, in arrival order.
    pub fn ticks(&self) -> Vec<u32> {
        self.ticks.lock().unwrap().clone()
    }

    pub fn frame_count(&self) -> usize {
        self.ticks.lock().unwrap().len()
    }
}

impl FrameTickObserver for FrameRecorder {
    fn on_tick(&self, elapsed_ms: u32) {
        self.ticks.lock().unwrap().push(elapsed_ms);
    }
}
