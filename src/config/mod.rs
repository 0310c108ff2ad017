use std::env;

use crate::matching::{ScoringWeights, DEFAULT_WEIGHTS};

/// Top-level configuration for embedding the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub default_weights: ScoringWeights,
    pub telemetry: TelemetryConfig,
}

impl EngineConfig {
    /// Load from the environment, falling back to compiled-in defaults for
    /// every unset variable. Set variables must parse.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let default_weights = ScoringWeights {
            amount: weight_var("MATCH_WEIGHT_AMOUNT", DEFAULT_WEIGHTS.amount)?,
            mrr: weight_var("MATCH_WEIGHT_MRR", DEFAULT_WEIGHTS.mrr)?,
            tib: weight_var("MATCH_WEIGHT_TIB", DEFAULT_WEIGHTS.tib)?,
            cs: weight_var("MATCH_WEIGHT_CS", DEFAULT_WEIGHTS.cs)?,
        };

        let log_level = env::var("MATCH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            default_weights,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_weights: DEFAULT_WEIGHTS,
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

fn weight_var(name: &'static str, fallback: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(value) => {
            let parsed = value
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidWeight { var: name })?;
            if !parsed.is_finite() || parsed < 0.0 {
                return Err(ConfigError::InvalidWeight { var: name });
            }
            Ok(parsed)
        }
        Err(_) => Ok(fallback),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative finite number")]
    InvalidWeight { var: &'static str },
}
