// SPDX-License-Identifier: AGPL-3.0
// Toolkit Host Core - Launch configuration

use crate::observer::FrameTickObserver;
use std::fmt;
use std::sync::Arc;

/// Immutable record describing how the hosted toolkit should initialize.
///
/// Every field is set explicitly at construction and never mutated after
/// the bridge call begins. Range validation (positive dimensions, sane
/// frame rates) is the toolkit's responsibility; construction cannot fail.
///
/// The observer handle is shared by `Arc`, so the callback target is
/// guaranteed to outlive the toolkit run it is passed into.
#[derive(Clone)]
pub struct LaunchConfig {
    /// Program name, used by the toolkit as the window title.
    pub program_name: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Target frame rate the toolkit syncs its run loop to.
    pub fps: u32,
    /// Run without presenting a visible surface.
    pub hidden: bool,
    /// Invoked by the toolkit once per rendered frame.
    pub observer: Arc<dyn FrameTickObserver>,
}

impl LaunchConfig {
    pub fn new(
        program_name: impl Into<String>,
        window_width: u32,
        window_height: u32,
        fps: u32,
        hidden: bool,
        observer: Arc<dyn FrameTickObserver>,
    ) -> Self {
        Self {
            program_name: program_name.into(),
            window_width,
            window_height,
            fps,
            hidden,
            observer,
        }
    }
}

impl fmt::Debug for LaunchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchConfig")
            .field("program_name", &self.program_name)
            .field("window_width", &self.window_width)
            .field("window_height", &self.window_height)
            .field("fps", &self.fps)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}
