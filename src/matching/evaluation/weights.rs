use super::super::domain::{EngineVariant, ScoringWeights};

/// Compiled-in weight defaults, applied when neither the environment nor a
/// stored variant overrides a field.
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    amount: 0.25,
    mrr: 0.35,
    tib: 0.20,
    cs: 0.20,
};

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Resolve the weight vector for a variant lookup. Never fails: an absent
/// variant, or any absent or unusable field on a stored one, falls back to
/// the corresponding default rather than to zero.
pub(crate) fn resolve(stored: Option<&EngineVariant>, defaults: &ScoringWeights) -> ScoringWeights {
    let overrides = stored.map(|variant| variant.weights).unwrap_or_default();
    ScoringWeights {
        amount: sanitize(overrides.amount, defaults.amount),
        mrr: sanitize(overrides.mrr, defaults.mrr),
        tib: sanitize(overrides.tib, defaults.tib),
        cs: sanitize(overrides.cs, defaults.cs),
    }
}

fn sanitize(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(weight) if weight.is_finite() && weight >= 0.0 => weight,
        _ => fallback,
    }
}
