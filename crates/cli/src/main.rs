// SimStat - Simulator Statistics Analysis
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

use simstat_config::{OutputFormat, ReportConfig};
use simstat_core::compare::{check_pair, display_label, render_comparison};
use simstat_core::report::{render_csv, render_json, render_table, render_verbose, StatFilter};
use simstat_core::{MetricSet, StatStore};

const EXIT_OK: u8 = 0;
const EXIT_NO_STATS: u8 = 1;
const EXIT_USAGE_ERROR: u8 = 2;
const EXIT_OUTPUT_ERROR: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "simstat",
    author,
    version,
    about = "Parse and analyze gem5 stats.txt files",
    long_about = None
)]
#[command(group(
    ArgGroup::new("mode")
        .args(["json", "csv", "compare", "verbose"])
        .multiple(false)
))]
struct Cli {
    /// Path(s) to gem5 stats.txt
    #[arg(required = true)]
    stats_files: Vec<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Output in CSV format
    #[arg(long)]
    csv: bool,

    /// Compare two stats files side by side
    #[arg(long)]
    compare: bool,

    /// Show all parsed stats
    #[arg(long)]
    verbose: bool,

    /// Only show stats whose name matches this pattern (verbose mode)
    #[arg(long)]
    filter: Option<String>,

    /// CPU ID to extract stats for (default: 0)
    #[arg(long)]
    cpu_id: Option<u32>,

    /// Path to a report config (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn requested_format(&self) -> Option<OutputFormat> {
        if self.json {
            Some(OutputFormat::Json)
        } else if self.csv {
            Some(OutputFormat::Csv)
        } else if self.compare {
            Some(OutputFormat::Compare)
        } else if self.verbose {
            Some(OutputFormat::Verbose)
        } else {
            None
        }
    }
}

/// Settings after merging flags over the config file.
#[derive(Debug, Clone, PartialEq)]
struct RunSettings {
    format: OutputFormat,
    cpu_id: u32,
    filter: Option<String>,
    left_label: Option<String>,
    right_label: Option<String>,
}

fn resolve_settings(cli: &Cli, config: ReportConfig) -> RunSettings {
    RunSettings {
        format: cli
            .requested_format()
            .or(config.format)
            .unwrap_or_default(),
        cpu_id: cli.cpu_id.or(config.cpu_id).unwrap_or(0),
        filter: cli.filter.clone().or(config.filter),
        left_label: config.labels.left,
        right_label: config.labels.right,
    }
}

struct FileReport {
    path: PathBuf,
    store: StatStore,
    metrics: MetricSet,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    ExitCode::from(run(cli))
}

fn run(cli: Cli) -> u8 {
    let config = match &cli.config {
        Some(path) => match ReportConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{:#}", e);
                return EXIT_USAGE_ERROR;
            }
        },
        None => ReportConfig::default(),
    };
    let settings = resolve_settings(&cli, config);
    debug!("Run settings: {:?}", settings);

    if settings.format == OutputFormat::Compare {
        if let Err(e) = check_pair(cli.stats_files.len()) {
            error!("{}", e);
            return EXIT_USAGE_ERROR;
        }
    }

    let filter = match (&settings.filter, settings.format) {
        (Some(pattern), OutputFormat::Verbose) => Some(StatFilter::new(pattern)),
        (Some(pattern), _) => {
            warn!("--filter '{}' only applies to verbose output; ignoring", pattern);
            None
        }
        (None, _) => None,
    };

    let reports = collect_reports(&cli.stats_files, settings.cpu_id);
    if reports.is_empty() {
        error!("No valid stats files found");
        return EXIT_NO_STATS;
    }

    let rendered = match render(&settings, &reports, filter.as_ref()) {
        Ok(text) => text,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_NO_STATS;
        }
    };

    if let Err(e) = emit(&rendered, cli.output.as_deref()) {
        error!("{:#}", e);
        return EXIT_OUTPUT_ERROR;
    }
    EXIT_OK
}

/// Parses every input in order, skipping files that yield no stats.
fn collect_reports(paths: &[PathBuf], cpu_id: u32) -> Vec<FileReport> {
    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let store = simstat_core::parse_file(path);
        if store.is_empty() {
            warn!("No stats parsed from {}", path.display());
            continue;
        }
        info!("Parsed {} stats from {}", store.len(), path.display());
        let metrics = simstat_core::analyze(&store, cpu_id);
        reports.push(FileReport {
            path: path.clone(),
            store,
            metrics,
        });
    }
    reports
}

fn render(
    settings: &RunSettings,
    reports: &[FileReport],
    filter: Option<&StatFilter>,
) -> Result<String> {
    let entries = || -> Vec<(String, MetricSet)> {
        reports
            .iter()
            .map(|r| (r.path.display().to_string(), r.metrics.clone()))
            .collect()
    };

    let text = match settings.format {
        OutputFormat::Json => render_json(&entries()).context("Failed to render JSON report")?,
        OutputFormat::Csv => render_csv(&entries()),
        OutputFormat::Compare => {
            let [left, right] = reports else {
                anyhow::bail!(
                    "Comparison needs stats from both files, only {} usable",
                    reports.len()
                );
            };
            let left_label = settings
                .left_label
                .clone()
                .unwrap_or_else(|| display_label(&left.path));
            let right_label = settings
                .right_label
                .clone()
                .unwrap_or_else(|| display_label(&right.path));
            let rows = simstat_core::compare(&left.metrics, &right.metrics);
            render_comparison(&rows, &left_label, &right_label)
        }
        OutputFormat::Verbose => reports
            .iter()
            .map(|r| render_verbose(&r.path.display().to_string(), &r.store, filter))
            .collect(),
        OutputFormat::Human => reports
            .iter()
            .map(|r| render_table(&r.metrics, &format!("gem5 Stats: {}", file_name(&r.path))))
            .collect(),
    };
    Ok(text)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output dir {:?}", parent))?;
            }
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write report to {:?}", path))?;
            info!("Report written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write report to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use simstat_config::CompareLabels;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("simstat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_modes_are_mutually_exclusive() {
        let res = Cli::try_parse_from(["simstat", "--json", "--csv", "a.txt"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_files_required() {
        assert!(Cli::try_parse_from(["simstat", "--json"]).is_err());
    }

    #[test]
    fn test_default_settings() {
        let cli = parse(&["stats.txt"]);
        let settings = resolve_settings(&cli, ReportConfig::default());
        assert_eq!(settings.format, OutputFormat::Human);
        assert_eq!(settings.cpu_id, 0);
        assert_eq!(settings.filter, None);
    }

    #[test]
    fn test_flags_override_config() {
        let config = ReportConfig {
            format: Some(OutputFormat::Csv),
            cpu_id: Some(3),
            filter: Some("icache".into()),
            labels: CompareLabels {
                left: Some("base".into()),
                right: None,
            },
            ..Default::default()
        };
        let cli = parse(&["--json", "--cpu-id", "1", "stats.txt"]);
        let settings = resolve_settings(&cli, config.clone());
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.cpu_id, 1);
        assert_eq!(settings.filter.as_deref(), Some("icache"));
        assert_eq!(settings.left_label.as_deref(), Some("base"));

        let cli = parse(&["stats.txt"]);
        let settings = resolve_settings(&cli, config);
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.cpu_id, 3);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("m5out/timing/stats.txt")), "stats.txt");
    }
}
