//! wysi - a terminal HTML/CSS/JavaScript scratchpad with live preview.
//!
//! # Usage
//!
//! ```bash
//! wysi
//! wysi page.html
//! wysi --no-auto-refresh --refresh-delay 500 page.html
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use wysi::app::App;
use wysi::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use wysi::highlight::{HighlightBackground, set_background_mode};
use wysi::{logging, perf};
use wysi::scheduler::DEFAULT_QUIESCENCE;

/// Edit HTML, CSS and JavaScript side by side with a live preview
#[derive(Parser, Debug)]
#[command(name = "wysi", version, about, long_about = None)]
struct Cli {
    /// HTML file to open (created on first save if it does not exist)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Start with auto-refresh turned off
    #[arg(long)]
    no_auto_refresh: bool,

    /// Milliseconds of quiet after an edit before the preview refreshes
    #[arg(long, value_name = "MS")]
    refresh_delay: Option<u64>,

    /// Force syntax highlight theme background (light or dark)
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    logging::init(effective.log_file.as_deref(), effective.perf)?;
    perf::set_enabled(effective.perf);

    match effective.theme.unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => set_background_mode(None),
        ThemeMode::Light => set_background_mode(Some(HighlightBackground::Light)),
        ThemeMode::Dark => set_background_mode(Some(HighlightBackground::Dark)),
    }

    let refresh_delay = effective
        .refresh_delay_ms
        .map_or(DEFAULT_QUIESCENCE, Duration::from_millis);
    tracing::debug!(
        file = ?cli.file,
        auto_refresh = !effective.no_auto_refresh,
        refresh_delay_ms = refresh_delay.as_millis(),
        "starting"
    );

    let mut app = App::new(cli.file)
        .with_auto_refresh(!effective.no_auto_refresh)
        .with_refresh_delay(refresh_delay)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
