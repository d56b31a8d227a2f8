use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use metro_fare::domain::Fare;
use metro_fare::network::Graph;
use metro_fare::export::{ExportError, export_fare_tables};
use metro_fare::output::render_report;
use metro_fare::planner::{PlanError, compute};
use metro_fare::source::{
    DEFAULT_DATA_SOURCE, DataSource, NetworkCacheConfig, NetworkLoader, SourceConfig, SourceError,
};

#[derive(Parser, Debug)]
#[command(name = "metro-fare", version, about = "Find metro stations reachable for an exact fare")]
struct Cli {
    /// Network description: http(s):// URL, file:// URI or plain path
    #[arg(long, env = "METRO_FARE_DATA_SOURCE", default_value = DEFAULT_DATA_SOURCE)]
    data_source: DataSource,

    /// Cache the downloaded description at this path
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stations whose fare from the origin equals the budget
    Reach {
        /// Origin station name
        station: String,
        /// Exact fare to match
        #[arg(allow_negative_numbers = true)]
        budget: Fare,
        /// Print the shortest path to each station
        #[arg(long)]
        show_path: bool,
    },
    /// Write per-origin fare tables to a SQLite database
    Export {
        /// Database file
        #[arg(long, default_value = "metro_fare.db")]
        output: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Plan(PlanError::InvalidOrigin { .. }) => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

fn init_tracing() {
    // Default to warn so command output stays readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl Cli {
    fn source_config(&self) -> SourceConfig {
        let config = SourceConfig::new(self.data_source.clone()).with_timeout(self.timeout);
        match &self.cache {
            Some(path) => config.with_cache(NetworkCacheConfig::new(path)),
            None => config,
        }
    }
}

/// Render the `reach` report. Surrounding whitespace in the station
/// argument is ignored; the name itself must match exactly.
fn reach(
    graph: &Graph,
    station: &str,
    budget: Fare,
    show_path: bool,
) -> Result<String, PlanError> {
    let report = compute(graph, station.trim(), budget)?;
    Ok(render_report(graph, &report, show_path))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let loader = NetworkLoader::new(cli.source_config())?;
    let graph = loader.load().await?;

    match cli.command {
        Command::Reach {
            station,
            budget,
            show_path,
        } => {
            print!("{}", reach(&graph, &station, budget, show_path)?);
        }
        Command::Export { output } => {
            let summary = export_fare_tables(&graph, &output)?;
            println!(
                "Wrote {} tables ({} rows) to {}",
                summary.tables,
                summary.rows,
                output.display()
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}
