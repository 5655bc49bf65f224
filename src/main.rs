//! checkgen: generate a Checkstyle configuration document from exported
//! quality-profile rules.
//!
//! The binary is a thin driver over [`checkgen_core`]:
//! 1. Parses CLI arguments and loads the optional `Checkgen.toml`.
//! 2. Loads the rule input, either a profile or a scan rule array.
//! 3. Streams the generated document to stdout or to `--output`.
//! 4. Logs a one-line summary of what was exported.
//!
//! USAGE EXAMPLE:
//!   checkgen profile.json --tab-width 4 --output checkstyle.xml

use anyhow::{Context, Result};
use checkgen_core::{
    CheckgenConfig, Cli, ConfigExporter, ExportSummary, load_config, load_profile,
    load_scan_rules, merge_export_args, render_summary_line,
};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        if let Some(export_err) = err.downcast_ref::<checkgen_core::Error>() {
            for hint in export_err.suggestions() {
                eprintln!("  hint: {hint}");
            }
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (config_path, config) = match load_config(cli.config.as_deref())? {
        Some((path, config)) => (Some(path), config),
        None => (None, CheckgenConfig::default()),
    };
    init_tracing(cli.verbose || config.general.verbose);
    if let Some(path) = &config_path {
        tracing::debug!("Loaded configuration from {}", path.display());
    }

    let settings = merge_export_args(cli, &config);
    let exporter = ConfigExporter::new(&settings);
    let output_file = cli
        .output
        .clone()
        .or_else(|| config.general.output_file.clone());

    let summary = match &output_file {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file '{}'", path.display()))?;
            let mut out = io::BufWriter::new(file);
            let summary = export_input(cli, &exporter, &mut out)?;
            out.flush()
                .with_context(|| format!("Failed to flush output file '{}'", path.display()))?;
            summary
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let summary = export_input(cli, &exporter, &mut out)?;
            out.flush().context("Failed to flush stdout")?;
            summary
        }
    };

    tracing::info!("{}", render_summary_line(&summary));
    Ok(())
}

fn export_input<W: Write>(
    cli: &Cli,
    exporter: &ConfigExporter<'_>,
    out: &mut W,
) -> Result<ExportSummary> {
    if cli.scan {
        let rules = load_scan_rules(&cli.input)?;
        tracing::debug!("Loaded {} scan rules", rules.len());
        Ok(exporter.export_scan_rules(&rules, out)?)
    } else {
        let profile = load_profile(&cli.input)?;
        tracing::debug!(
            "Loaded profile '{}' with {} rules",
            profile.name,
            profile.rules.len()
        );
        Ok(exporter.export_profile(&profile, out)?)
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
