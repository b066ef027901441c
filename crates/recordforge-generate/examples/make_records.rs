//! Print records from a plan as JSON lines.
//!
//! Usage: `make_records [PLAN] [COUNT]`. Logs go to stderr as JSON and are
//! filtered by `RUST_LOG` (default `info`).

use std::error::Error;
use std::path::PathBuf;

use recordforge_generate::Factory;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

const DEFAULT_PLAN: &str = "plans/examples/people.plan.json";
const DEFAULT_COUNT: usize = 5;

fn main() -> Result<(), Box<dyn Error>> {
    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(layer)
        .try_init()?;

    let mut args = std::env::args().skip(1);
    let plan_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAN));
    let count = match args.next() {
        Some(raw) => raw.parse()?,
        None => DEFAULT_COUNT,
    };

    let mut factory = Factory::from_plan_path(&plan_path)?;
    for record in factory.make_some(count) {
        println!("{}", serde_json::to_string(&record?)?);
    }
    Ok(())
}
