//! Token pricing and cost calculation
//!
//! Rates are currency per 1,000,000 tokens. The table is injected into
//! [`CostCalculator`]; a TOML file can layer overrides on top of the built-in
//! table:
//!
//! ```toml
//! [default]
//! input = 3.0
//! output = 15.0
//!
//! [models."openai/gpt-5.2"]
//! input = 1.75
//! output = 14.0
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::stats::round_to;

const TOKENS_PER_RATE_UNIT: f64 = 1_000_000.0;

/// Input/output price pair, per million tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelRates {
    pub input: f64,
    pub output: f64,
}

impl ModelRates {
    pub const fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }
}

/// Rates used for model ids missing from the table
pub const DEFAULT_RATES: ModelRates = ModelRates::new(3.0, 15.0);

const BUILTIN_RATES: &[(&str, ModelRates)] = &[
    ("openai/gpt-5.2", ModelRates::new(1.75, 14.0)),
    ("openai/gpt-5.2-codex", ModelRates::new(1.25, 10.0)),
    ("anthropic/claude-opus-4.5", ModelRates::new(5.0, 25.0)),
    ("anthropic/claude-sonnet-4.5", ModelRates::new(3.0, 15.0)),
    ("google/gemini-3-flash-preview", ModelRates::new(0.50, 3.0)),
    ("google/gemini-3-pro-preview", ModelRates::new(2.0, 12.0)),
    ("moonshotai/kimi-k2.5", ModelRates::new(0.60, 2.5)),
    ("z-ai/glm-4.7", ModelRates::new(0.30, 1.2)),
    ("qwen/qwen3-coder", ModelRates::new(0.30, 1.2)),
    ("minimax/minimax-m2.1", ModelRates::new(0.30, 1.2)),
    ("arcee-ai/trinity-large-preview:free", ModelRates::new(0.0, 0.0)),
];

/// Pricing overrides as read from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ModelRates>,

    #[serde(default)]
    pub models: IndexMap<String, ModelRates>,
}

impl PricingConfig {
    /// Load pricing overrides from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| BenchError::io_operation("read", path.display(), e))?;
        let config: PricingConfig =
            toml::from_str(&content).map_err(|source| BenchError::InvalidPricing {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let entries = self
            .default
            .iter()
            .map(|r| ("default", r))
            .chain(self.models.iter().map(|(m, r)| (m.as_str(), r)));
        for (name, rates) in entries {
            let valid = |v: f64| v.is_finite() && v >= 0.0;
            if !valid(rates.input) || !valid(rates.output) {
                return Err(BenchError::invalid_value(
                    "pricing rate",
                    format!("{} ({}, {})", name, rates.input, rates.output),
                ));
            }
        }
        Ok(())
    }
}

/// Model id -> rates, with a fallback pair for unknown ids
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    default: ModelRates,
    models: IndexMap<String, ModelRates>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Rates resolved for one model id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLookup {
    pub rates: ModelRates,
    /// True when the id was unknown and the default pair was used
    pub fallback: bool,
}

impl PricingTable {
    /// The bundled table of known model prices
    pub fn builtin() -> Self {
        Self {
            default: DEFAULT_RATES,
            models: BUILTIN_RATES
                .iter()
                .map(|(id, rates)| (id.to_string(), *rates))
                .collect(),
        }
    }

    /// A table with no known models
    pub fn with_default(default: ModelRates) -> Self {
        Self {
            default,
            models: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, model: impl Into<String>, rates: ModelRates) {
        self.models.insert(model.into(), rates);
    }

    /// Layer file overrides on top of this table.
    pub fn apply(mut self, config: PricingConfig) -> Self {
        if let Some(default) = config.default {
            self.default = default;
        }
        self.models.extend(config.models);
        self
    }

    pub fn default_rates(&self) -> ModelRates {
        self.default
    }

    pub fn lookup(&self, model: &str) -> RateLookup {
        match self.models.get(model) {
            Some(rates) => RateLookup {
                rates: *rates,
                fallback: false,
            },
            None => RateLookup {
                rates: self.default,
                fallback: true,
            },
        }
    }
}

/// Pure token-to-cost mapping over an injected pricing table
#[derive(Debug, Clone, Default)]
pub struct CostCalculator {
    table: PricingTable,
}

impl CostCalculator {
    pub fn new(table: PricingTable) -> Self {
        Self { table }
    }

    /// Whether `model` has its own entry (rather than the default pair)
    pub fn is_priced(&self, model: &str) -> bool {
        !self.table.lookup(model).fallback
    }

    /// Cost of the given token totals, rounded to cents.
    pub fn cost(&self, model: &str, input_tokens: f64, output_tokens: f64) -> f64 {
        let rates = self.table.lookup(model).rates;
        let cost = (input_tokens / TOKENS_PER_RATE_UNIT) * rates.input
            + (output_tokens / TOKENS_PER_RATE_UNIT) * rates.output;
        round_to(cost, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cost_formula() {
        let mut table = PricingTable::with_default(ModelRates::new(0.0, 0.0));
        table.insert("anthropic/claude-sonnet-4.5", ModelRates::new(3.0, 15.0));
        let calc = CostCalculator::new(table);
        assert_eq!(
            calc.cost("anthropic/claude-sonnet-4.5", 2_000_000.0, 500_000.0),
            13.5
        );
    }

    #[test]
    fn test_unknown_model_uses_default_rates() {
        let calc = CostCalculator::default();
        assert!(!calc.is_priced("acme/new-model"));
        assert_eq!(calc.cost("acme/new-model", 1_000_000.0, 1_000_000.0), 18.0);
    }

    #[test]
    fn test_builtin_table_entries() {
        let calc = CostCalculator::default();
        assert!(calc.is_priced("z-ai/glm-4.7"));
        assert_eq!(calc.cost("openai/gpt-5.2", 1_000_000.0, 100_000.0), 3.15);
        assert_eq!(
            calc.cost("arcee-ai/trinity-large-preview:free", 5_000_000.0, 5_000_000.0),
            0.0
        );
    }

    #[test]
    fn test_cost_rounds_to_cents() {
        let calc = CostCalculator::default();
        // 1234 * 3 / 1e6 + 567 * 15 / 1e6 = 0.012207
        assert_eq!(calc.cost("unknown", 1234.0, 567.0), 0.01);
    }

    #[test]
    fn test_overrides_layer_on_builtin() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pricing.toml");
        fs::write(
            &path,
            r#"
[default]
input = 1.0
output = 2.0

[models."openai/gpt-5.2"]
input = 10.0
output = 20.0

[models."acme/new-model"]
input = 0.1
output = 0.2
"#,
        )
        .unwrap();

        let config = PricingConfig::load(&path).unwrap();
        let table = PricingTable::builtin().apply(config);

        assert_eq!(table.default_rates(), ModelRates::new(1.0, 2.0));
        assert_eq!(table.lookup("openai/gpt-5.2").rates, ModelRates::new(10.0, 20.0));
        assert_eq!(table.lookup("acme/new-model").rates, ModelRates::new(0.1, 0.2));
        // untouched built-in entry
        assert_eq!(table.lookup("qwen/qwen3-coder").rates, ModelRates::new(0.30, 1.2));
        assert!(table.lookup("other").fallback);
    }

    #[test]
    fn test_override_without_default_keeps_builtin_default() {
        let config: PricingConfig = toml::from_str(
            r#"
[models."acme/new-model"]
input = 0.1
output = 0.2
"#,
        )
        .unwrap();
        let table = PricingTable::builtin().apply(config);
        assert_eq!(table.default_rates(), DEFAULT_RATES);
    }

    #[test]
    fn test_invalid_pricing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pricing.toml");
        fs::write(&path, "[models.\"x\"]\ninput = \"cheap\"\n").unwrap();
        let err = PricingConfig::load(&path).unwrap_err();
        assert!(matches!(err, BenchError::InvalidPricing { .. }));

        fs::write(&path, "[models.\"x\"]\ninput = -1.0\noutput = 1.0\n").unwrap();
        let err = PricingConfig::load(&path).unwrap_err();
        assert!(matches!(err, BenchError::InvalidValue { .. }));
    }
}
