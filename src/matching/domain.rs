use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for loan applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only feature snapshot of an application, captured at invocation time.
///
/// The engine never writes back to the application record; this struct is also
/// embedded verbatim in the decision trace as the `inputs` audit field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    pub id: ApplicationId,
    pub amount_requested: f64,
    pub product_category: String,
    pub monthly_revenue: f64,
    pub time_in_business_months: u32,
    pub industry: String,
    pub credit_score: u16,
}

/// Operator-tunable adjustments applied after the weighted base score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductKnobs {
    pub score_boost: f64,
    pub out_of_box_penalty: f64,
}

/// An active lender product with its hard constraints and scoring knobs.
///
/// Absent bounds mean "unbounded"; absent floors mean "no floor". The
/// allow-list and block-list are applied independently of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderProduct {
    pub key: String,
    pub name: String,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub min_monthly_revenue: Option<f64>,
    pub min_time_in_business_months: Option<u32>,
    pub min_credit_score: Option<u16>,
    pub industries_allowed: Option<BTreeSet<String>>,
    pub industries_blocked: Option<BTreeSet<String>>,
    pub rate_apr: f64,
    pub term_months: u32,
    pub knobs: ProductKnobs,
}

/// Fully resolved weight vector applied to the normalized features.
///
/// The weights are linear coefficients; nothing requires them to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub amount: f64,
    pub mrr: f64,
    pub tib: f64,
    pub cs: f64,
}

/// Stored per-variant weight overrides. Absent fields fall back field-by-field
/// to the configured defaults, never to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VariantWeights {
    pub amount: Option<f64>,
    pub mrr: Option<f64>,
    pub tib: Option<f64>,
    pub cs: Option<f64>,
}

/// Named scoring configuration, selected externally (e.g. by an A/B
/// experiment assignment the engine does not own).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineVariant {
    pub key: String,
    pub weights: VariantWeights,
}

/// Breadth at which a policy rule applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleScope {
    Global,
    Product(String),
    Application(ApplicationId),
}

impl fmt::Display for RuleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleScope::Global => f.write_str("global"),
            RuleScope::Product(key) => write!(f, "product:{key}"),
            RuleScope::Application(id) => write!(f, "application:{id}"),
        }
    }
}

/// Stored policy rule: a scope plus the raw rule string, parsed at load time
/// by the evaluator. The engine only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    pub scope: RuleScope,
    pub rule: String,
}

/// Audit record for one rule evaluated during one product evaluation.
///
/// Every evaluation is recorded, pass or fail; `vetoed` marks the hits that
/// actually forced ineligibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleHit {
    pub scope: RuleScope,
    pub product_key: String,
    pub rule: String,
    pub passed: bool,
    pub vetoed: bool,
}

/// Offer terms, surfaced only when the product is eligible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductOffer {
    pub apr: f64,
    pub term_months: u32,
}

/// Per-product outcome carried in both the caller result and the trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResult {
    pub product_key: String,
    pub product_name: String,
    pub eligible: bool,
    pub score: f64,
    pub reasons: Vec<String>,
    pub offer: Option<ProductOffer>,
    pub knobs: ProductKnobs,
}

/// Engine output for one `(application, variant)` invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub application_id: ApplicationId,
    pub variant: String,
    pub weights: ScoringWeights,
    pub top: Vec<ProductResult>,
    pub all: Vec<ProductResult>,
    pub rules_applied: Vec<RuleHit>,
    pub inputs: FeatureSnapshot,
}

impl DecisionResult {
    /// One-line rationale for operator-facing surfaces.
    pub fn summary(&self) -> String {
        let eligible = self.all.iter().filter(|result| result.eligible).count();
        match self.top.first() {
            Some(best) => format!(
                "{eligible} eligible product(s); best match {} at {:.2}",
                best.product_key, best.score
            ),
            None => "no eligible products".to_string(),
        }
    }

    /// Sanitized projection for API responses owned by other subsystems.
    pub fn view(&self) -> DecisionView {
        DecisionView {
            application_id: self.application_id.clone(),
            variant: self.variant.clone(),
            eligible_count: self.all.iter().filter(|result| result.eligible).count(),
            best_product: self.top.first().map(|result| result.product_key.clone()),
            best_score: self.top.first().map(|result| result.score),
        }
    }
}

/// Immutable audit record of one engine invocation. Once appended it is never
/// mutated or deleted by the engine; repeated invocations append new rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub application_id: ApplicationId,
    pub variant: String,
    pub weights: ScoringWeights,
    pub results: Vec<ProductResult>,
    pub rules_applied: Vec<RuleHit>,
    pub inputs: FeatureSnapshot,
    pub created_at: DateTime<Utc>,
}

/// Compact serializable view of a decision.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionView {
    pub application_id: ApplicationId,
    pub variant: String,
    pub eligible_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<f64>,
}
