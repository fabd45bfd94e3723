// demos/classify_results.rs
use county_climate::{analyze, load_places, ClimateError, CountyTable, Metric, DEFAULT_WINDOW};
use std::path::Path;

fn main() -> Result<(), ClimateError> {
    // Set RUST_LOG=info (or debug) to see what the loader skips
    env_logger::init();

    // Series written earlier by `county_climate collect`
    let results_dir = Path::new("data/results");
    let counties = CountyTable::from_csv(Path::new("data/US_counties.csv"))?;

    let mut records = load_places(results_dir, &Metric::tavg(), &counties)?;
    println!("Loaded {} places from {}", records.len(), results_dir.display());

    let counts = analyze(&mut records, DEFAULT_WINDOW);
    println!("Indicators: {}", counts);

    for record in records.iter().filter(|r| r.is_classified()) {
        if let (Some(indicator), Some(ttest)) = (record.indicator, record.ttest) {
            println!(
                "{:<40} {} (t = {:.2}, p = {:.3})",
                record.county.display_name(),
                indicator,
                ttest.statistic,
                ttest.pvalue
            );
        }
    }

    Ok(())
}
