use std::process::ExitCode;

use isochrone::domain::CalendarDate;
use isochrone::domain::time::parse_hms;
use isochrone::planner::{IsochroneReport, PlannerConfig};
use isochrone::sample::lausanne;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATE: &str = "2014-03-28";
const DEFAULT_START: &str = "Lausanne-Flon";
const DEFAULT_DEPARTURE: &str = "06:08:00";

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn run() -> Result<String, Box<dyn std::error::Error>> {
    let date: CalendarDate = env_or("ISOCHRONE_DATE", DEFAULT_DATE).parse()?;
    let start = env_or("ISOCHRONE_START", DEFAULT_START);
    let departure = parse_hms(&env_or("ISOCHRONE_DEPARTURE", DEFAULT_DEPARTURE))?;

    info!(%date, %start, departure, "computing isochrone over the Lausanne sample");

    let planner = lausanne()?;
    let tree = planner.fastest_paths(date, &start, departure, &PlannerConfig::default())?;
    let report = IsochroneReport::from_tree(&tree)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

fn main() -> ExitCode {
    init_logger();

    match run() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
