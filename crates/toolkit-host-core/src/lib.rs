// SPDX-License-Identifier: AGPL-3.0
// Toolkit Host Core - Hosting contract for the ToolKit engine
//
// This crate provides:
// - LaunchConfig, the immutable record describing how the toolkit starts
// - The FrameTickObserver capability, invoked once per rendered frame
// - ToolkitBridge, the single blocking call into the toolkit's run loop
// - HostSettings and SettingsStore for persistent host settings
//
// The shell binary lives in a separate crate.

pub mod bridge;
pub mod config;
mod ffi;
pub mod observer;
pub mod settings;
pub mod types;

// Re-export commonly used items
pub use bridge::ToolkitBridge;
pub use config::LaunchConfig;
pub use observer::{FrameRecorder, FrameTickObserver, NoopObserver};
pub use settings::{HostSettings, SettingsStore};
pub use types::{HostError, RunStatus};
