//! Precinct CLI binary.
//!
//! Provides the command-line interface for the NYPD shooting analysis.

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use precinct::pipeline::{self, PipelineConfig, Source};
use precinct::{Borough, Season};
use precinct_analysis::{available_aggregates, summarize};
use precinct_data::IncidentTable;
use precinct_data::nypd::DEFAULT_SOURCE_URL;
use precinct_model::Predictor;
use precinct_output::{AggregateSummary, ExportFormat, ModelSummary};
use std::error::Error as _;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "precinct")]
#[command(about = "Precinct: NYPD shooting incident analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Read incidents from a local CSV export
    #[arg(long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Download incidents from this URL
    #[arg(long)]
    url: Option<String>,

    /// Download timeout in seconds
    #[arg(long, default_value = "120")]
    timeout: u64,
}

impl SourceArgs {
    fn source(&self) -> Source {
        match (&self.file, &self.url) {
            (Some(path), _) => Source::File(path.clone()),
            (None, Some(url)) => Source::Url(url.clone()),
            (None, None) => Source::Url(DEFAULT_SOURCE_URL.to_string()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load, aggregate, fit, forecast and write every table
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory for the exported tables
        #[arg(long, default_value = "output")]
        out: PathBuf,

        /// Export format (csv, json or pretty-json)
        #[arg(long, default_value = "csv")]
        format: ExportFormat,

        /// Number of years to forecast after the last observed year
        #[arg(long, default_value = "1")]
        forecast_years: u32,

        /// Prediction interval level
        #[arg(long, default_value = "0.95")]
        interval: f64,

        /// Point predictions only
        #[arg(long)]
        no_interval: bool,

        /// Print the model summary as Markdown
        #[arg(long)]
        markdown: bool,
    },

    /// Print the four aggregate tables
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List boroughs, seasons, aggregates and model predictors
    Describe,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

async fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Run {
            source,
            out,
            format,
            forecast_years,
            interval,
            no_interval,
            markdown,
        } => {
            let config = PipelineConfig {
                source: source.source(),
                out_dir: out,
                format,
                forecast_years,
                interval: (!no_interval).then_some(interval),
                timeout_secs: source.timeout,
            };
            run_pipeline(&config, markdown).await?;
        }
        Commands::Summary { source } => {
            let config = PipelineConfig {
                source: source.source(),
                timeout_secs: source.timeout,
                ..PipelineConfig::default()
            };
            let table = load_with_spinner(&config).await?;
            let report = summarize(&table)?;
            println!("{}", AggregateSummary::new(&report));
        }
        Commands::Describe => describe(),
    }

    Ok(())
}

async fn load_with_spinner(config: &PipelineConfig) -> Result<IncidentTable, Box<dyn std::error::Error>> {
    let Source::Url(url) = &config.source else {
        return Ok(pipeline::load(config).await?);
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")?);
    pb.set_message(format!("Downloading {}", url));
    pb.enable_steady_tick(Duration::from_millis(100));

    match pipeline::load(config).await {
        Ok(table) => {
            pb.finish_with_message(format!("Loaded {} incidents", table.len()));
            Ok(table)
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            Err(e.into())
        }
    }
}

async fn run_pipeline(config: &PipelineConfig, markdown: bool) -> Result<(), Box<dyn std::error::Error>> {
    debug!(?config, "pipeline configuration");
    let table = load_with_spinner(config).await?;
    let output = pipeline::analyze(&table, config)?;
    let paths = pipeline::export(&output, &config.out_dir, config.format)?;

    println!("{}", AggregateSummary::new(&output.report));

    let summary = ModelSummary::from(&output.model);
    if markdown {
        println!("{}", summary.to_markdown());
    } else {
        println!("{}", summary.to_ascii_table());
    }

    if let (Some(first), Some(last)) = (output.predictions.first(), output.predictions.last()) {
        println!(
            "Forecast: {} predictions for {}-{:02} to {}-{:02}",
            output.predictions.len(),
            first.year,
            first.month,
            last.year,
            last.month
        );
    }

    println!("\nTables written:");
    for path in paths {
        println!("  {}", path.display());
    }

    Ok(())
}

fn describe() {
    println!("\nBoroughs:");
    println!("{:<16} {:<16}", "BORO", "Indicator");
    println!("{}", "-".repeat(34));
    for borough in Borough::all() {
        println!(
            "{:<16} {:<16}",
            borough.name(),
            borough.indicator_column().unwrap_or("(baseline)")
        );
    }

    println!("\nSeasons:");
    for season in Season::all() {
        let months: Vec<String> = season.months().iter().map(u32::to_string).collect();
        println!("  {:<8} months {}", season.name(), months.join(", "));
    }

    println!("\nAggregates:");
    for info in available_aggregates() {
        println!(
            "  {:<24} by {:<12} {}",
            info.name,
            info.keys.join(", "),
            info.description
        );
    }

    println!("\nModel predictors:");
    let names: Vec<&str> = Predictor::ALL.iter().map(|p| p.name()).collect();
    println!("  count ~ {}", names.join(" + "));
}
