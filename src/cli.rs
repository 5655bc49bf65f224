use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for `checkgen`.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "checkgen",
    about = "Generate a Checkstyle configuration document from exported quality-profile rules"
)]
pub struct Cli {
    /// Path to the JSON file containing the rules to export.
    pub input: PathBuf,

    /// Treat the input as a runtime scan rule array instead of a profile.
    #[arg(long)]
    pub scan: bool,

    /// Write the generated document to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Path to a configuration file. Defaults to `Checkgen.toml` discovery.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the `tabWidth` property emitted on the root module.
    #[arg(long)]
    pub tab_width: Option<String>,

    /// Enable verbose logging.
    #[arg(long, short)]
    pub verbose: bool,
}
