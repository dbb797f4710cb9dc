//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::spy::ActivePolicy;

/// Config file looked up when `-C` is not given.
pub const DEFAULT_CONFIG: &str = "tocspy.toml";

/// Table of contents and scroll-spy for Markdown blog posts
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: tocspy.toml)
    #[arg(short = 'C', long, default_value = DEFAULT_CONFIG, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the heading outline of a post
    #[command(visible_alias = "o")]
    Outline {
        #[command(flatten)]
        args: OutlineArgs,
    },

    /// Simulate scrolling through a post and print the active heading
    #[command(visible_alias = "s")]
    Spy {
        #[command(flatten)]
        args: SpyArgs,
    },

    /// Rank tags across a directory of posts
    #[command(visible_alias = "t")]
    Tags {
        #[command(flatten)]
        args: TagsArgs,
    },
}

/// Outline command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct OutlineArgs {
    /// Markdown or rendered HTML file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Output JSON instead of a tree
    #[arg(short, long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long, requires = "json")]
    pub pretty: bool,
}

/// Spy command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct SpyArgs {
    /// Markdown or rendered HTML file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Scroll positions to visit, in order (comma-separated pixels)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub scroll: Vec<f64>,

    /// Document offset of each heading (comma-separated pixels).
    /// Estimated from source lines for Markdown when omitted.
    #[arg(short, long, value_delimiter = ',')]
    pub offsets: Option<Vec<f64>>,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    pub viewport_height: f64,

    /// Pixels per source line when estimating offsets
    #[arg(long, default_value_t = 24.0)]
    pub line_height: f64,

    /// How the active heading is chosen (overrides `spy.policy`)
    #[arg(short, long, value_enum)]
    pub policy: Option<ActivePolicy>,
}

/// Tags command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct TagsArgs {
    /// Directory containing posts
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,

    /// Number of popular tags to show (overrides `tags.max`)
    #[arg(short, long)]
    pub max: Option<usize>,

    /// List the posts carrying this tag instead
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Output JSON
    #[arg(short, long)]
    pub json: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_outline(&self) -> bool {
        matches!(self.command, Commands::Outline { .. })
    }
    pub const fn is_spy(&self) -> bool {
        matches!(self.command, Commands::Spy { .. })
    }
    pub const fn is_tags(&self) -> bool {
        matches!(self.command, Commands::Tags { .. })
    }
}
