use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uinv_lib::StyleKind;

#[derive(Parser)]
#[command(name = "uinv")]
#[command(
    version,
    about = "UI Inventory - Catalog captured components and design-token styles",
    long_about = "UI Inventory (uinv)\n\nReads a capture snapshot exported by the extension (JSON or YAML) and derives:\n- components: one entry per distinct element identity, with capture counts.\n- styles: every distinct (token, value, kind) style with usage counts.\n- component: one component's captures, sources and visual essentials.\n- style: where a style is used and which components use it.\n- essentials: the visual-essentials table for a single capture.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) with [identity] and [essentials] settings"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every distinct component in the snapshot
    Components {
        #[arg(long, short, help = "Capture snapshot file (JSON, or YAML by extension)")]
        input: PathBuf,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
    /// List every distinct style with usage counts
    Styles {
        #[arg(long, short, help = "Capture snapshot file (JSON, or YAML by extension)")]
        input: PathBuf,

        #[arg(
            long,
            help = "Only list styles of this kind (color,typography,spacing,border,radius,shadow)"
        )]
        kind: Option<StyleKind>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
    /// Show one component's captures, sources and visual essentials
    Component {
        #[arg(long, short, help = "Capture snapshot file (JSON, or YAML by extension)")]
        input: PathBuf,

        #[arg(long, help = "Component key (see `uinv components`)")]
        key: String,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
    /// Show where a style is used and which components use it
    Style {
        #[arg(long, short, help = "Capture snapshot file (JSON, or YAML by extension)")]
        input: PathBuf,

        #[arg(long, help = "Style id (see `uinv styles`)")]
        id: String,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
    /// Show the visual-essentials table for a single capture
    Essentials {
        #[arg(long, short, help = "Capture snapshot file (JSON, or YAML by extension)")]
        input: PathBuf,

        #[arg(long, help = "Capture id")]
        capture: String,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
