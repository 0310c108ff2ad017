use std::collections::BTreeSet;

use super::super::domain::{ApplicationId, FeatureSnapshot, PolicyRule, RuleHit, RuleScope};

/// Parsed form of a stored rule string.
///
/// Anything the parser does not recognize, including malformed numerics or
/// invalid JSON payloads, degrades to `Passthrough`: recorded for audit
/// visibility but with no eligibility effect, so one bad configuration entry
/// cannot take down scoring for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub enum RulePredicate {
    CreditScoreFloor(u16),
    RevenueFloor(f64),
    IndustryBlock(BTreeSet<String>),
    Passthrough(String),
}

impl RulePredicate {
    pub fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix("min_credit_score>=") {
            if let Ok(floor) = rest.trim().parse::<u16>() {
                return Self::CreditScoreFloor(floor);
            }
        } else if let Some(rest) = raw.strip_prefix("min_monthly_revenue>=") {
            if let Some(floor) = rest.trim().parse::<f64>().ok().filter(|v| v.is_finite()) {
                return Self::RevenueFloor(floor);
            }
        } else if let Some(rest) = raw.strip_prefix("block_industries=") {
            if let Ok(industries) = serde_json::from_str::<BTreeSet<String>>(rest) {
                return Self::IndustryBlock(industries);
            }
        }
        Self::Passthrough(raw.to_string())
    }

    /// Whether the application satisfies this rule.
    pub fn passes(&self, snapshot: &FeatureSnapshot) -> bool {
        match self {
            RulePredicate::CreditScoreFloor(floor) => snapshot.credit_score >= *floor,
            RulePredicate::RevenueFloor(floor) => snapshot.monthly_revenue >= *floor,
            RulePredicate::IndustryBlock(industries) => !industries.contains(&snapshot.industry),
            RulePredicate::Passthrough(_) => true,
        }
    }

    /// Whether a failing evaluation forces ineligibility.
    pub fn enforceable(&self) -> bool {
        !matches!(self, RulePredicate::Passthrough(_))
    }
}

/// A policy rule parsed once at load time, retaining the raw string for the
/// audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRule {
    pub scope: RuleScope,
    pub raw: String,
    pub predicate: RulePredicate,
}

impl From<PolicyRule> for LoadedRule {
    fn from(rule: PolicyRule) -> Self {
        let predicate = RulePredicate::parse(&rule.rule);
        Self {
            scope: rule.scope,
            raw: rule.rule,
            predicate,
        }
    }
}

/// Rules applicable to one product evaluation, in scope order: global first,
/// then the specific product, then the specific application.
pub(crate) fn in_scope<'a>(
    rules: &'a [LoadedRule],
    product_key: &str,
    application_id: &ApplicationId,
) -> Vec<&'a LoadedRule> {
    let mut applicable: Vec<&LoadedRule> = rules
        .iter()
        .filter(|rule| matches!(rule.scope, RuleScope::Global))
        .collect();
    applicable.extend(
        rules
            .iter()
            .filter(|rule| matches!(&rule.scope, RuleScope::Product(key) if key == product_key)),
    );
    applicable.extend(
        rules
            .iter()
            .filter(|rule| matches!(&rule.scope, RuleScope::Application(id) if id == application_id)),
    );
    applicable
}

/// Outcome of evaluating the applicable rules for one product.
pub(crate) struct RuleEvaluation {
    pub hits: Vec<RuleHit>,
    pub veto_reasons: Vec<String>,
}

/// Evaluate rules veto-only: a failing enforceable rule in any scope disables
/// the product, and no rule can re-enable it. Every hit is recorded.
pub(crate) fn evaluate_rules(
    rules: &[&LoadedRule],
    snapshot: &FeatureSnapshot,
    product_key: &str,
) -> RuleEvaluation {
    let mut hits = Vec::with_capacity(rules.len());
    let mut veto_reasons = Vec::new();

    for rule in rules {
        let passed = rule.predicate.passes(snapshot);
        let vetoed = !passed && rule.predicate.enforceable();
        if vetoed {
            veto_reasons.push(format!("policy rule '{}' failed ({})", rule.raw, rule.scope));
        }
        hits.push(RuleHit {
            scope: rule.scope.clone(),
            product_key: product_key.to_string(),
            rule: rule.raw.clone(),
            passed,
            vetoed,
        });
    }

    RuleEvaluation { hits, veto_reasons }
}
