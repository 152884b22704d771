//! Command implementations for vibebench

pub mod average;
pub mod dispatch;
pub mod leaderboard;
pub mod merge;
pub mod report;

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use vibebench_core::error::Result;
use vibebench_core::pricing::{CostCalculator, PricingConfig, PricingTable};

/// Built-in pricing, with overrides from `path` when given
pub(crate) fn load_calculator(path: Option<&Path>) -> Result<CostCalculator> {
    let table = match path {
        Some(path) => {
            let config = PricingConfig::load(path)?;
            debug!(path = %path.display(), models = config.models.len(), "loaded pricing overrides");
            PricingTable::builtin().apply(config)
        }
        None => PricingTable::builtin(),
    };
    Ok(CostCalculator::new(table))
}

pub(crate) fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
