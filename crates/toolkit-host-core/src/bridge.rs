// SPDX-License-Identifier: AGPL-3.0
// Toolkit Host Core - Toolkit bridge
//
// The single synchronous call that hands a launch configuration to the
// external toolkit. The call blocks for the toolkit's entire run lifetime;
// termination is toolkit-driven (e.g. the user closes the window) and the
// host has no way to interrupt it once started.

use crate::config::LaunchConfig;
use crate::ffi::{self, RawEntryFn, RawLaunchParams};
use crate::types::{HostError, RunStatus};
use libloading::Library;
use std::ffi::{CString, OsStr};
use std::os::raw::c_int;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Base name of the toolkit library; expanded to the platform file name
/// (`ToolKit.dll`, `libToolKit.so`, `libToolKit.dylib`).
const TOOLKIT_LIBRARY_NAME: &str = "ToolKit";

/// Handle to a loaded toolkit library.
pub struct ToolkitBridge {
    entry: RawEntryFn,
    // Keeps the library mapped for as long as the entry pointer is held.
    _library: Option<Library>,
}

impl ToolkitBridge {
    /// Open the toolkit library at `path` and resolve its entry point.
    ///
    /// Both failure modes are load-time errors, distinct from the toolkit
    /// itself reporting [`RunStatus::Failed`] after a run.
    pub fn load(path: impl AsRef<OsStr>) -> Result<Self, HostError> {
        let path = path.as_ref();
        tracing::info!("Loading toolkit library from {:?}", path);

        let library = unsafe { Library::new(path) }.map_err(|source| HostError::LibraryLoad {
            path: PathBuf::from(path),
            source,
        })?;

        let entry: RawEntryFn = unsafe {
            let symbol = library
                .get::<RawEntryFn>(ffi::ENTRY_SYMBOL)
                .map_err(|source| HostError::EntryMissing {
                    symbol: ffi::ENTRY_SYMBOL_NAME,
                    source,
                })?;
            *symbol
        };

        Ok(Self {
            entry,
            _library: Some(library),
        })
    }

    /// Open the toolkit library by its platform-conventional file name,
    /// searched for the way the dynamic linker normally would.
    pub fn load_default() -> Result<Self, HostError> {
        Self::load(libloading::library_filename(TOOLKIT_LIBRARY_NAME))
    }

    /// Hand control to the toolkit's run loop.
    ///
    /// Blocks the calling thread until the toolkit decides to terminate.
    /// During the call the toolkit repeatedly invokes the configured
    /// observer, possibly from its own run-loop thread. The returned status
    /// reflects only what the toolkit reports on exit; there is no retry
    /// and no recovery on `Failed`.
    ///
    /// Concurrent calls serialize: the bridge is non-reentrant.
    pub fn run(&self, config: &LaunchConfig) -> Result<RunStatus, HostError> {
        let program_name = CString::new(config.program_name.as_str())?;

        // Installed for the whole run; cleared when the guard drops.
        let _guard = ffi::ObserverGuard::install(config.observer.clone());

        let params = RawLaunchParams {
            program_name: program_name.as_ptr(),
            window_width: config.window_width as c_int,
            window_height: config.window_height as c_int,
            fps: config.fps as c_int,
            hidden: config.hidden,
            frame_callback: ffi::frame_trampoline,
        };

        tracing::info!(
            "Handing control to the toolkit: \"{}\", {}x{} @ {} fps, hidden: {}",
            config.program_name,
            config.window_width,
            config.window_height,
            config.fps,
            config.hidden
        );

        // `program_name` must stay alive across this call.
        let raw = unsafe { (self.entry)(params) };

        let status = RunStatus::from_raw(raw)?;
        tracing::info!("Toolkit run loop exited: {}", status);
        Ok(status)
    }

    /// Run the toolkit on a dedicated worker thread, for hosts that cannot
    /// block their primary thread. The terminal status arrives through the
    /// returned single-shot channel once the run loop exits.
    pub fn run_detached(self, config: LaunchConfig) -> mpsc::Receiver<Result<RunStatus, HostError>> {
        let (tx, rx) = mpsc::sync_channel(1);
        thread::Builder::new()
            .name("toolkit-run".to_string())
            .spawn(move || {
                let result = self.run(&config);
                let _ = tx.send(result);
            })
            .expect("Failed to spawn toolkit run thread");
        rx
    }

    #[cfg(test)]
    pub(crate) fn from_entry(entry: RawEntryFn) -> Self {
        Self {
            entry,
            _library: None,
        }
    }
}
