//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Page asset registry and resource URL resolver
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: headkit.toml)
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = "headkit.toml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Register the assets of a manifest and print their markup
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },

    /// Resolve resource references to page URLs
    #[command(visible_alias = "u")]
    Url {
        #[command(flatten)]
        args: UrlArgs,
    },
}

/// Render command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Asset manifest (TOML with `[[assets]]` entries)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub manifest: PathBuf,

    /// Insertion point to render
    #[arg(short, long, default_value = "head")]
    pub location: String,

    /// Resolve `href`/`src` through the URL resolver before registering
    #[arg(short, long)]
    pub resolve: bool,
}

/// Url command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct UrlArgs {
    /// References to resolve
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Prefix results with the configured domain
    #[arg(short, long)]
    pub domain: bool,

    /// Override the timestamp window in seconds (<= 0 disables)
    #[arg(short, long, allow_negative_numbers = true)]
    pub timestamp_age: Option<i64>,

    /// Print results as a JSON object
    #[arg(long)]
    pub json: bool,
}
