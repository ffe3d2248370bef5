//! WebToApp - interactive console for turning URLs into desktop apps.
//!
//! Generated apps show up in the desktop's application menu. Webview apps are
//! started through the `webtoapp-window` host, which must be installed next to
//! this binary or named with `--window-bin`.

mod menu;

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use webtoapp_core::config::AppConfig;
use webtoapp_core::{AppContext, WebAppManager};

use crate::menu::Menu;

#[derive(Parser, Debug)]
#[command(name = "webtoapp")]
#[command(about = "Turn websites into desktop applications")]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Home directory to install apps under (defaults to the current user's)
    #[arg(long)]
    home: Option<PathBuf>,

    /// Window host executable used by webview launchers
    #[arg(long, env = "WEBTOAPP_WINDOW_BIN")]
    window_bin: Option<PathBuf>,

    /// Skip refreshing the desktop application index
    #[arg(long)]
    no_refresh: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they never interleave with the menu on stdout.
    let default_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    debug!("Starting {}", AppConfig::APP_NAME);

    let mut ctx = match args.home {
        Some(home) => AppContext::with_home(home),
        None => AppContext::for_current_user().context("Could not determine home directory")?,
    };
    if let Some(window_bin) = args.window_bin {
        ctx = ctx.with_window_bin(window_bin);
    }
    if args.no_refresh {
        ctx = ctx.with_refresh_command(None);
    }

    if let Err(e) = ctx.ensure_directories() {
        error!("Failed to create required directories: {}", e);
        return Err(e).context("Failed to create required directories");
    }

    info!("Registry: {}", ctx.registry_path.display());
    debug!("Window host: {}", ctx.window_bin.display());

    let manager = WebAppManager::new(ctx);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(manager, stdin.lock(), stdout.lock());
    menu.run()
}
