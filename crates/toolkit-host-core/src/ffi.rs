// SPDX-License-Identifier: AGPL-3.0
// Toolkit Host Core - Raw ABI layer
//
// The exact memory layout and calling convention the toolkit's binary
// interface expects. `extern "system"` selects the platform-standard
// convention (stdcall on 32-bit Windows, the C convention elsewhere),
// matching how the toolkit exports its entry point.

use crate::observer::FrameTickObserver;
use std::os::raw::{c_char, c_int};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// Exported entry point symbol of the toolkit library.
pub(crate) const ENTRY_SYMBOL: &[u8] = b"AbtMain\0";
pub(crate) const ENTRY_SYMBOL_NAME: &str = "AbtMain";

/// Per-frame callback the toolkit invokes with the elapsed milliseconds
/// since the previous frame.
pub(crate) type RawFrameCallback = extern "system" fn(c_int);

/// `AbtMain(RawLaunchParams) -> i32`, passed by value, returning the raw
/// status code (0 failed, 1 succeeded).
pub(crate) type RawEntryFn = unsafe extern "system" fn(RawLaunchParams) -> i32;

/// Launch parameters exactly as the toolkit expects them.
///
/// Field order and types are part of the binary contract: a NUL-terminated
/// program name, two integers for the window size, the target frame rate,
/// the hidden flag (a one-byte C `bool`), and the frame callback pointer.
#[repr(C)]
pub(crate) struct RawLaunchParams {
    pub program_name: *const c_char,
    pub window_width: c_int,
    pub window_height: c_int,
    pub fps: c_int,
    pub hidden: bool,
    pub frame_callback: RawFrameCallback,
}

// The ABI carries a bare function pointer with no user-data slot, so the
// observer for the run in progress lives in a process-global slot read by
// the trampoline. RUN_LOCK is held for the whole bridge call: the bridge
// is non-reentrant and concurrent run attempts serialize.
static RUN_LOCK: Mutex<()> = Mutex::new(());
static ACTIVE_OBSERVER: RwLock<Option<Arc<dyn FrameTickObserver>>> = RwLock::new(None);

/// Installs an observer for one toolkit run and clears it on drop.
pub(crate) struct ObserverGuard {
    _run: MutexGuard<'static, ()>,
}

impl ObserverGuard {
    pub(crate) fn install(observer: Arc<dyn FrameTickObserver>) -> Self {
        let run = RUN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        *ACTIVE_OBSERVER.write().unwrap_or_else(|e| e.into_inner()) = Some(observer);
        Self { _run: run }
    }
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        *ACTIVE_OBSERVER.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// The function pointer handed to the toolkit. Called by the toolkit,
/// possibly from its own run-loop thread; must not unwind across the FFI
/// boundary.
pub(crate) extern "system" fn frame_trampoline(elapsed: c_int) {
    let Ok(slot) = ACTIVE_OBSERVER.read() else {
        return;
    };
    if let Some(observer) = slot.as_ref() {
        // The contract says elapsed time is non-negative; clamp garbage
        // from a non-conforming toolkit instead of wrapping it.
        observer.on_tick(u32::try_from(elapsed).unwrap_or(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::FrameRecorder;

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_raw_params_layout_is_pinned() {
        use std::mem::{offset_of, size_of};

        assert_eq!(offset_of!(RawLaunchParams, program_name), 0);
        assert_eq!(offset_of!(RawLaunchParams, window_width), 8);
        assert_eq!(offset_of!(RawLaunchParams, window_height), 12);
        assert_eq!(offset_of!(RawLaunchParams, fps), 16);
        assert_eq!(offset_of!(RawLaunchParams, hidden), 20);
        assert_eq!(offset_of!(RawLaunchParams, frame_callback), 24);
        assert_eq!(size_of::<RawLaunchParams>(), 32);
    }

    #[test]
    fn test_trampoline_is_idempotent_callable() {
        let recorder = Arc::new(FrameRecorder::new());
        let _guard = ObserverGuard::install(recorder.clone());

        for elapsed in [0, 1, 16, 33, c_int::MAX] {
            frame_trampoline(elapsed);
        }

        assert_eq!(recorder.ticks(), vec![0, 1, 16, 33, c_int::MAX as u32]);
    }

    #[test]
    fn test_trampoline_clamps_negative_elapsed() {
        let recorder = Arc::new(FrameRecorder::new());
        let _guard = ObserverGuard::install(recorder.clone());

        frame_trampoline(-5);

        assert_eq!(recorder.ticks(), vec![0]);
    }

    #[test]
    fn test_trampoline_without_observer_is_a_no_op() {
        // Hold the run lock directly so no other test has an observer
        // installed while we fire the trampoline at an empty slot.
        let _run = RUN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        frame_trampoline(16);
    }

    #[test]
    fn test_guard_clears_the_slot_on_drop() {
        let recorder = Arc::new(FrameRecorder::new());
        {
            let _guard = ObserverGuard::install(recorder.clone());
            frame_trampoline(16);
        }
        // Re-acquire the lock so the empty-slot call below cannot observe
        // another test's observer.
        let _run = RUN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        frame_trampoline(16);
        assert_eq!(recorder.ticks(), vec![16]);
    }
}
