//! headkit - render page assets and resolve resource URLs.

mod cli;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use headkit::{SiteConfig, debug, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    // Only an explicitly passed config must exist.
    let required = cli.config != std::path::Path::new("headkit.toml");
    let config = SiteConfig::load(&cli.config, required)
        .with_context(|| format!("failed to load config `{}`", cli.config.display()))?;
    debug!("config"; "site root: {}", config.site_root().display());

    match &cli.command {
        Commands::Render { args } => cli::render::run_render(args, &config),
        Commands::Url { args } => cli::url::run_url(args, &config),
    }
}
