//! Chermiti Building showcase
//!
//! Opens the interactive tower tour. Settings come from a TOML config file;
//! command-line flags override the most common ones.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use chermiti::config::SiteConfig;
use chermiti::portal::SessionStore;
use chermiti::ui::Theme;
use chermiti::SiteApp;

#[derive(Parser)]
#[command(name = "chermiti")]
#[command(about = "Interactive 3D showcase for the Chermiti Building", long_about = None)]
struct Cli {
    /// Configuration file path (default: <config_dir>/chermiti/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Colour theme to start with
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Go straight to the tour, skipping the loading and welcome screens
    #[arg(long)]
    skip_intro: bool,

    /// Directory for the stored login session (default: <data_dir>/chermiti)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // RUST_LOG overrides the default level, e.g. RUST_LOG=chermiti=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SiteConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(theme) = cli.theme {
        config.site.theme = theme;
    }
    if cli.skip_intro {
        config.site.skip_intro = true;
    }

    let store = match cli.data_dir {
        Some(dir) => SessionStore::in_dir(dir),
        None => SessionStore::in_data_dir().context("Failed to locate the session directory")?,
    };
    log::info!("Session file: {}", store.path().display());

    let app = SiteApp::new(config, store).context("Failed to create the application")?;
    app.run().context("Showcase exited with an error")
}
