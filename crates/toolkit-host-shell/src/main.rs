// SPDX-License-Identifier: AGPL-3.0
// Toolkit Host Shell - Window host for the ToolKit engine
//
// Builds the launch configuration, hands control to the toolkit once, and
// reports the terminal status. Everything visible on screen is the
// toolkit's doing; this binary only starts it and waits.

mod stats;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use toolkit_host_core::{HostError, HostSettings, RunStatus, SettingsStore, ToolkitBridge};

/// Window host for the ToolKit engine
#[derive(Debug, Parser)]
#[command(name = "toolkit-host", version, about)]
struct Args {
    /// Path to the toolkit shared library (defaults to the platform
    /// library name, e.g. libToolKit.so)
    #[arg(long)]
    library: Option<PathBuf>,

    /// Window title override
    #[arg(long)]
    title: Option<String>,

    /// Window width override, in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height override, in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Target frame rate override
    #[arg(long)]
    fps: Option<u32>,

    /// Run without presenting a visible window
    #[arg(long)]
    hidden: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("toolkit_host_shell=info".parse().unwrap())
                .add_directive("toolkit_host_core=info".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Toolkit Host v{}", env!("CARGO_PKG_VERSION"));

    let settings = apply_overrides(load_settings(), &args);

    let bridge = match load_bridge(&settings) {
        Ok(bridge) => bridge,
        Err(e) => {
            // Never folded into the toolkit's own Failed status: the
            // external call was not executed at all.
            tracing::error!("Could not load the toolkit library: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let frame_stats = Arc::new(stats::FrameStats::new());
    let config = settings.to_launch_config(frame_stats.clone());

    match bridge.run(&config) {
        Ok(RunStatus::Succeeded) => {
            frame_stats.log_summary();
            ExitCode::SUCCESS
        }
        Ok(RunStatus::Failed) => {
            frame_stats.log_summary();
            tracing::error!("Toolkit reported failure on exit");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("Toolkit run did not complete: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings() -> HostSettings {
    match SettingsStore::new() {
        Ok(store) => store.get(),
        Err(e) => {
            tracing::warn!("Could not load settings, using defaults: {}", e);
            HostSettings::default()
        }
    }
}

fn apply_overrides(mut settings: HostSettings, args: &Args) -> HostSettings {
    if let Some(library) = &args.library {
        settings.library_path = Some(library.clone());
    }
    if let Some(title) = &args.title {
        settings.program_name = title.clone();
    }
    if let Some(width) = args.width {
        settings.window_width = width;
    }
    if let Some(height) = args.height {
        settings.window_height = height;
    }
    if let Some(fps) = args.fps {
        settings.fps = fps;
    }
    if args.hidden {
        settings.hidden = true;
    }
    settings
}

fn load_bridge(settings: &HostSettings) -> Result<ToolkitBridge, HostError> {
    match &settings.library_path {
        Some(path) => ToolkitBridge::load(path),
        None => ToolkitBridge::load_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_settings() {
        let args = Args {
            library: Some(PathBuf::from("/opt/toolkit/libToolKit.so")),
            title: Some("demo".to_string()),
            width: Some(640),
            height: Some(480),
            fps: Some(60),
            hidden: true,
        };

        let settings = apply_overrides(HostSettings::default(), &args);
        assert_eq!(settings.program_name, "demo");
        assert_eq!(settings.window_width, 640);
        assert_eq!(settings.window_height, 480);
        assert_eq!(settings.fps, 60);
        assert!(settings.hidden);
        assert_eq!(
            settings.library_path,
            Some(PathBuf::from("/opt/toolkit/libToolKit.so"))
        );
    }

    #[test]
    fn test_no_overrides_leaves_settings_alone() {
        let args = Args {
            library: None,
            title: None,
            width: None,
            height: None,
            fps: None,
            hidden: false,
        };

        let settings = apply_overrides(HostSettings::default(), &args);
        assert_eq!(settings.program_name, "ToolKit");
        assert_eq!(settings.window_width, 1024);
        assert!(!settings.hidden);
    }
}
