//! WebToApp window host.
//!
//! Started by generated webview launchers. Opens one window on the app's URL
//! and serves the page's key-value bridge from the app's storage directory.

mod commands;
mod window;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use url::Url;
use webtoapp_core::config::StoreConfig;
use webtoapp_core::{Bridge, KeyValueStore};

#[derive(Parser, Debug)]
#[command(name = "webtoapp-window")]
#[command(about = "Embedded window host for WebToApp webview apps")]
struct Args {
    /// Window title
    #[arg(long)]
    title: String,

    /// Page to open
    #[arg(long)]
    url: String,

    /// Directory holding the app's key-value store and log file
    #[arg(long)]
    storage_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _guard = init_logging(&args.storage_dir, args.debug)?;

    let url = Url::parse(&args.url).with_context(|| format!("Invalid URL: {}", args.url))?;
    let store = KeyValueStore::open(&args.storage_dir)?;
    info!("Key-value store at {}", store.db_path().display());

    let title = args.title;
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(Bridge::new(store))
        .invoke_handler(tauri::generate_handler![commands::bridge])
        .setup(move |app| {
            window::open_main_window(app, &title, url)?;
            Ok(())
        })
        .on_window_event(window::confirm_close)
        .run(tauri::generate_context!())
        .context("Window host failed")?;

    Ok(())
}

/// Send logs to `<storage_dir>/webview.log`. Keep the guard alive until exit.
fn init_logging(storage_dir: &Path, debug: bool) -> Result<WorkerGuard> {
    fs::create_dir_all(storage_dir)
        .with_context(|| format!("Failed to create {}", storage_dir.display()))?;

    let appender = tracing_appender::rolling::never(storage_dir, StoreConfig::LOG_FILENAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_launcher_arguments() {
        let args = Args::try_parse_from([
            "webtoapp-window",
            "--title",
            "My Tool",
            "--url",
            "https://example.com",
            "--storage-dir",
            "/tmp/storage/my_tool",
        ])
        .unwrap();

        assert_eq!(args.title, "My Tool");
        assert_eq!(args.url, "https://example.com");
        assert_eq!(args.storage_dir, PathBuf::from("/tmp/storage/my_tool"));
        assert!(!args.debug);
    }

    #[test]
    fn test_storage_dir_is_required() {
        let result = Args::try_parse_from(["webtoapp-window", "--title", "x", "--url", "y"]);
        assert!(result.is_err());
    }
}
