mod config;
mod render;
mod table;
mod tui;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gymreport_core::{
    aggregate, CsvWorkoutSource, Dimension, Metric, Period, RecordStore, Renderer, ReportBuilder,
    ReportPlan, ReportUseCase, WorkoutSource,
};

use crate::config::{Config, Overrides};
use crate::render::{Format, JsonRenderer, SvgRenderer};

#[derive(Parser)]
#[command(name = "gymreport")]
#[command(about = "Turns a workout log into a multi-page training report", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/gymreport/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Build the report and write it to the output path
    Render {
        #[command(flatten)]
        overrides: Overrides,
        /// Output format (guessed from the output extension when omitted)
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
    /// Print a single series as a table
    Table {
        #[command(flatten)]
        overrides: Overrides,
        /// category | exercise
        #[arg(short, long, default_value = "category")]
        dimension: String,
        /// Category or exercise name (exact match)
        #[arg(short, long)]
        target: String,
        /// week | month
        #[arg(short, long, default_value = "week")]
        period: String,
        /// sum (volume) | max (weight)
        #[arg(short, long, default_value = "sum")]
        metric: String,
    },
    /// Page through the report in the terminal
    Preview {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// List categories and exercises in the log
    List {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the active report definition as JSON
    Plan {
        #[command(flatten)]
        overrides: Overrides,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_plan(config: &Config) -> Result<ReportPlan> {
    match &config.plan {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Could not read plan {}", path.display()))?;
            let plan = ReportPlan::from_json(&json)
                .with_context(|| format!("Invalid plan {}", path.display()))?;
            info!(path = %path.display(), pages = plan.pages.len(), "loaded report plan");
            Ok(plan)
        }
        None => Ok(ReportPlan::standard()),
    }
}

fn load_store(config: &Config) -> Result<RecordStore> {
    let source = CsvWorkoutSource::new(&config.input);
    let cutoff = config.cutoff()?;
    let store = RecordStore::load(source.rows()?)
        .with_context(|| format!("Could not load workout log {}", config.input.display()))?;
    Ok(store.filter_since(cutoff))
}

fn write_report(config: &Config, format: Option<Format>) -> Result<()> {
    let page_size = config.page_size()?;
    match format.unwrap_or_else(|| Format::from_path(&config.output)) {
        Format::Svg => render_report(config, &SvgRenderer::new(&config.output, page_size)),
        Format::Json => render_report(config, &JsonRenderer::new(&config.output)),
    }
}

fn render_report<R: Renderer>(config: &Config, renderer: &R) -> Result<()> {
    let plan = load_plan(config)?;
    let source = CsvWorkoutSource::new(&config.input);
    let cutoff = config.cutoff()?;
    ReportUseCase::new(&source, renderer)
        .run(&plan, cutoff)
        .with_context(|| format!("Could not build report from {}", config.input.display()))?;
    println!("Report written to {}", config.output.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let base = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Render { overrides, format }) => {
            write_report(&base.apply(&overrides), format)?;
        }
        Some(Commands::Table {
            overrides,
            dimension,
            target,
            period,
            metric,
        }) => {
            let config = base.apply(&overrides);
            let dimension: Dimension = dimension.parse()?;
            let period: Period = period.parse()?;
            let metric: Metric = metric.parse()?;
            let store = load_store(&config)?;
            let series = aggregate(&store, dimension, &target, period, metric);
            table::show_series(&series, dimension, &target, period, metric);
        }
        Some(Commands::Preview { overrides }) => {
            let config = base.apply(&overrides);
            let plan = load_plan(&config)?;
            let store = load_store(&config)?;
            let document = ReportBuilder::new(&plan).build(&store);
            tui::run(document)?;
        }
        Some(Commands::List { overrides }) => {
            let config = base.apply(&overrides);
            let store = load_store(&config)?;
            table::show_names(&store);
        }
        Some(Commands::Plan { overrides }) => {
            let config = base.apply(&overrides);
            let plan = load_plan(&config)?;
            println!("{}", plan.to_json()?);
        }
        // Same as a bare `render` with config-file values.
        None => write_report(&base, None)?,
    }
    Ok(())
}
