//! CLI entry point: `collect` fetches series from NOAA, `analyze` classifies
//! them and renders the map.

use anyhow::Context;
use clap::{Parser, Subcommand};
use county_climate::{
    analyze, load_places, ApiToken, ClimateError, Collector, CollectorConfig, CountyTable,
    HttpTransport, MarkerMap, Metric, SeriesKey, SeriesWriter, WriteOutcome, DEFAULT_END_YEAR,
    DEFAULT_START_YEAR, DEFAULT_WINDOW,
};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "county_climate",
    about = "Collect NOAA monthly climate series for US counties and map warming/cooling trends"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one monthly series per place and write it to the results directory
    Collect {
        /// Calendar month to collect, e.g. 07 for July
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
        /// GSOM datatype code
        #[arg(long, default_value = "TAVG")]
        metric: Metric,
        #[arg(long, default_value_t = DEFAULT_START_YEAR)]
        start_year: i32,
        /// Last year to collect (inclusive)
        #[arg(long, default_value_t = DEFAULT_END_YEAR)]
        end_year: i32,
        #[arg(long, default_value = "data/results")]
        results_dir: PathBuf,
        /// County reference table (only read with --first-per-state)
        #[arg(long, default_value = "data/US_counties.csv")]
        counties: PathBuf,
        /// FIPS place code to collect; repeat for several places
        #[arg(long = "place", required_unless_present = "first_per_state")]
        places: Vec<u32>,
        /// Collect the first county listed for every state in the reference table
        #[arg(long, conflicts_with = "places")]
        first_per_state: bool,
        /// Records per page (the API maximum is 1000)
        #[arg(long)]
        page_size: Option<u32>,
        /// Override the CDO `data` endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Classify every collected series and save the marker map
    Analyze {
        #[arg(long, default_value = "TAVG")]
        metric: Metric,
        /// Number of leading and trailing years compared
        #[arg(long, default_value_t = DEFAULT_WINDOW)]
        window: usize,
        #[arg(long, default_value = "data/results")]
        results_dir: PathBuf,
        #[arg(long, default_value = "data/US_counties.csv")]
        counties: PathBuf,
        /// Where to write the HTML map
        #[arg(long, default_value = "images/results.html")]
        output: PathBuf,
    },
}

struct CollectArgs {
    month: u32,
    metric: Metric,
    start_year: i32,
    end_year: i32,
    results_dir: PathBuf,
    places: Vec<u32>,
    config: CollectorConfig,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Commands::Collect {
            month,
            metric,
            start_year,
            end_year,
            results_dir,
            counties,
            places,
            first_per_state,
            page_size,
            endpoint,
        } => {
            // Checked before anything else so a missing credential never
            // costs a reference-table load or a request.
            let token = ApiToken::from_env().context("Cannot collect without an API token")?;

            let places = if first_per_state {
                let table = CountyTable::from_csv(&counties)
                    .with_context(|| format!("Loading {}", counties.display()))?;
                table.first_per_state().iter().map(|c| c.geoid).collect()
            } else {
                places
            };

            let config = CollectorConfig::builder()
                .maybe_endpoint(endpoint)
                .maybe_page_size(page_size)
                .build();
            let args = CollectArgs {
                month,
                metric,
                start_year,
                end_year,
                results_dir,
                places,
                config,
            };
            run_collect(args, token)?;
        }
        Commands::Analyze {
            metric,
            window,
            results_dir,
            counties,
            output,
        } => {
            run_analyze(&metric, window, &results_dir, &counties, &output)
                .context("Analysis failed")?;
        }
    }
    Ok(())
}

fn run_collect(args: CollectArgs, token: ApiToken) -> Result<(), ClimateError> {
    let transport = HttpTransport::new(args.config.endpoint.clone(), token)?;
    let collector = Collector::new(transport, args.config);
    let writer = SeriesWriter::new(args.results_dir);

    let (mut written, mut skipped, mut failed) = (0usize, 0usize, 0usize);
    for place in args.places {
        let key = SeriesKey::new(
            args.metric.clone(),
            place,
            args.month,
            args.start_year,
            args.end_year,
        );
        match writer.write_month_sequence(&collector, &key) {
            Ok(WriteOutcome::Written(_)) => written += 1,
            Ok(WriteOutcome::Skipped(_)) => skipped += 1,
            Ok(WriteOutcome::NoData) => failed += 1,
            Err(e) => {
                error!("{}: {}", key, e);
                failed += 1;
            }
        }
    }

    info!(
        "Collection finished: {} written, {} skipped, {} failed",
        written, skipped, failed
    );
    Ok(())
}

fn run_analyze(
    metric: &Metric,
    window: usize,
    results_dir: &Path,
    counties: &Path,
    output: &Path,
) -> Result<(), ClimateError> {
    let table = CountyTable::from_csv(counties)?;
    let mut places = load_places(results_dir, metric, &table)?;
    if places.is_empty() {
        warn!(
            "No {} series found in {}",
            metric,
            results_dir.display()
        );
    }

    let counts = analyze(&mut places, window);
    info!("Classified {} places: {}", counts.classified(), counts);

    MarkerMap::from_records(&places).save(output)?;
    Ok(())
}
