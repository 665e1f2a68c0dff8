//! CLI entry point for the movie processing pipeline.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use movie_processing::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use movie_processing::{
    DataProcessor, FilterCriteria, OutputFormat, PipelineConfig, RunSummary, StageStatus,
};
use tracing::info;

/// CLI-compatible output format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// Whitespace-aligned text table
    Txt,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli: CliOutputFormat) -> Self {
        match cli {
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Txt => OutputFormat::Txt,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Movie dataset processing pipeline",
    long_about = "Cleans, filters, aggregates, encodes and clips a movie dataset, \
                  then writes the result.\n\n\
                  EXAMPLES:\n  \
                  # Fixed batch run: imdb_top_1000.csv -> processed_data.csv\n  \
                  movie-processing\n\n  \
                  # Only dramas after 2005, written as a text table\n  \
                  movie-processing --genre drama --min-year 2005 -o dramas.txt --format txt\n\n  \
                  # Machine-readable run summary\n  \
                  movie-processing --json | jq .shape_after"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: String,

    /// Path of the processed output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: String,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    format: CliOutputFormat,

    /// Keep rows whose Genre contains this text (case-insensitive)
    #[arg(long)]
    genre: Option<String>,

    /// Keep rows whose Runtime is greater than this
    #[arg(long)]
    min_duration: Option<f64>,

    /// Keep rows whose Year is greater than this
    #[arg(long)]
    min_year: Option<f64>,

    /// Keep rows whose Director contains this text (case-insensitive)
    #[arg(long)]
    director: Option<String>,

    /// Column to sort by
    #[arg(long, default_value = "IMDB_Rating")]
    sort_by: String,

    /// Sort ascending instead of descending
    #[arg(long)]
    ascending: bool,

    /// Keep numeric-looking string columns (e.g. "142 min") as strings
    #[arg(long)]
    no_coerce: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output the run summary as JSON to stdout
    ///
    /// Disables all logs; only the JSON summary is printed.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> Result<PipelineConfig> {
    let mut filter = FilterCriteria::new();
    if let Some(ref genre) = args.genre {
        filter = filter.genre(genre);
    }
    if let Some(minutes) = args.min_duration {
        filter = filter.min_duration(minutes);
    }
    if let Some(year) = args.min_year {
        filter = filter.min_year(year);
    }
    if let Some(ref director) = args.director {
        filter = filter.director(director);
    }

    let config = PipelineConfig::builder()
        .input_path(&args.input)
        .output_path(&args.output)
        .output_format(args.format.into())
        .filter(filter)
        .sort(&args.sort_by, args.ascending)
        .coerce_numeric_strings(!args.no_coerce)
        .build()?;

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;

    let mut builder = DataProcessor::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|outcome| {
            if outcome.status == StageStatus::Applied {
                info!("[{}] {}", outcome.stage.display_name(), outcome.message);
            }
        });
    }

    let mut processor = builder
        .load()
        .with_context(|| format!("Could not load {}", args.input))?;
    let summary = processor.start().context("Pipeline failed")?;

    if args.json {
        println!("{}", summary.to_json_pretty()?);
        return Ok(());
    }

    print_human_readable_summary(&summary);
    Ok(())
}

/// Print the end-of-run summary.
///
/// Uses `println!` because this is the primary user-facing output and must
/// be visible regardless of log level.
fn print_human_readable_summary(summary: &RunSummary) {
    println!();
    println!("{}", "=".repeat(80));
    println!("PROCESSING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        summary.input_file.as_deref().unwrap_or("<memory>"),
        summary.shape_before.0,
        summary.shape_before.1
    );
    match summary.output_file {
        Some(ref output_file) => println!(
            "Output: {} ({} rows x {} columns, {})",
            output_file, summary.shape_after.0, summary.shape_after.1, summary.output_format
        ),
        None => println!("Output: nothing written"),
    }
    println!("Duration: {}ms", summary.duration_ms);
    println!();

    println!("Stages:");
    for outcome in &summary.stages {
        let status = match outcome.status {
            StageStatus::Applied => "applied",
            StageStatus::Skipped => "skipped",
        };
        println!(
            "  {:<20} {:<8} {} -> {} rows",
            outcome.stage.display_name(),
            status,
            outcome.rows_before,
            outcome.rows_after
        );
        if !outcome.missing_columns.is_empty() {
            println!("  {:<20} missing: {}", "", outcome.missing_columns.join(", "));
        }
    }
    println!();
}
