use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wago_quote_parser::{
    Layout, ParseOptions, ParseReport, ParsedQuote, QuoteError, export_quote_csv, parse_quote_pdf,
};

#[derive(Debug, Parser)]
#[command(
    name = "quote2csv",
    version,
    about = "Extract part numbers, prices and series discounts from WAGO quote PDFs into CSV"
)]
struct Cli {
    /// Quote PDF to parse.
    input: PathBuf,

    /// Directory for the CSV. Defaults to the input's directory.
    output_dir: Option<PathBuf>,

    /// Quote template family: adaptive or fixed.
    #[arg(long, default_value = "adaptive")]
    layout: Layout,

    /// Do not look for "<nnn> Series ... Discount <pct>%" in descriptions.
    #[arg(long)]
    no_embedded_discounts: bool,

    /// Debug logging and per-warning output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> ParseOptions {
        ParseOptions {
            embedded_series_discounts: !self.no_embedded_discounts,
            ..ParseOptions::with_layout(self.layout)
        }
    }

    fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            self.input
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        })
    }
}

fn log_report(report: &ParseReport, verbose: bool) {
    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!(
                "  - {:?} page={:?} table_id={:?}: {}",
                warning.code, warning.page, warning.table_id, warning.message
            );
        }
    }
}

fn print_summary(parsed: &ParsedQuote, layout: Layout, saved: &Path) -> Result<()> {
    println!("Rows: {}", parsed.row_count());
    println!(
        "Quote Number: {}",
        parsed.metadata.quote_number.as_deref().unwrap_or("unknown")
    );
    if layout == Layout::Adaptive {
        let metadata = serde_json::to_string(&parsed.metadata)
            .context("failed to serialize quote metadata")?;
        println!("Metadata: {metadata}");
    }
    println!("Saved: {}", saved.display());
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options();
    let parsed = parse_quote_pdf(&cli.input, &options)?;
    log_report(&parsed.report, cli.verbose);

    let output_dir = cli.output_dir();
    let saved = export_quote_csv(&parsed, &output_dir)
        .with_context(|| format!("failed to write CSV into '{}'", output_dir.display()))?;
    print_summary(&parsed, options.layout, &saved)
}

fn main() -> ExitCode {
    // Usage errors share exit code 1 with every other failure; help and version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let default_filter = if cli.verbose {
        "wago_quote_parser=debug"
    } else {
        "wago_quote_parser=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.downcast_ref::<QuoteError>() {
                Some(quote_error)
                    if quote_error.is_input_error() || quote_error.is_empty_extraction() =>
                {
                    eprintln!("{quote_error}");
                }
                _ => eprintln!("Parse error: {error:#}"),
            }
            ExitCode::from(1)
        }
    }
}
