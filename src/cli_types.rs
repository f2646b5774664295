use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (default: .fencefmt.toml in the working directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show detailed output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format code blocks, flagging the ones the formatter rejects
    Format(FormatArgs),
    /// Interactively fix code blocks carrying an error marker
    Fix(TargetArgs),
    /// List code blocks carrying an error marker
    Analyze(TargetArgs),
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Languages to process (comma-separated, overrides config)
    #[arg(short, long, value_name = "LANGS")]
    pub lang: Option<String>,

    /// File or directory to search for documents
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct FormatArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Report blocks that would change without writing (exit 1 if any)
    #[arg(long, help = "Exit with code 1 if any block would be reformatted or is rejected (for CI)")]
    pub check: bool,
}

impl Commands {
    pub fn target(&self) -> &TargetArgs {
        match self {
            Self::Format(args) => &args.target,
            Self::Fix(args) | Self::Analyze(args) => args,
        }
    }
}
