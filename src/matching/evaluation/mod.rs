//! Per-product evaluation pipeline: hard constraints, scoped policy rules,
//! variant weight resolution, and the weighted scoring function.

pub(crate) mod eligibility;
pub(crate) mod rules;
pub(crate) mod scoring;
pub(crate) mod weights;

pub use rules::{LoadedRule, RulePredicate};
pub use weights::DEFAULT_WEIGHTS;

use super::domain::{
    ApplicationId, FeatureSnapshot, LenderProduct, ProductOffer, ProductResult, RuleHit,
    ScoringWeights,
};

/// Evaluate one product against the snapshot under the resolved weights.
///
/// Hard-constraint failures and vetoing policy rules both accumulate into the
/// result's reasons; all rule hits are returned separately for the audit
/// trail. Ineligible products score exactly zero and carry no offer.
pub(crate) fn evaluate_product(
    product: &LenderProduct,
    snapshot: &FeatureSnapshot,
    weights: &ScoringWeights,
    loaded_rules: &[LoadedRule],
    application_id: &ApplicationId,
) -> (ProductResult, Vec<RuleHit>) {
    let mut reasons = eligibility::constraint_reasons(product, snapshot);

    let applicable = rules::in_scope(loaded_rules, &product.key, application_id);
    let evaluation = rules::evaluate_rules(&applicable, snapshot, &product.key);
    reasons.extend(evaluation.veto_reasons);

    let eligible = reasons.is_empty();
    let score = if eligible {
        scoring::match_score(product, snapshot, weights)
    } else {
        0.0
    };
    let offer = eligible.then(|| ProductOffer {
        apr: product.rate_apr,
        term_months: product.term_months,
    });

    (
        ProductResult {
            product_key: product.key.clone(),
            product_name: product.name.clone(),
            eligible,
            score,
            reasons,
            offer,
            knobs: product.knobs,
        },
        evaluation.hits,
    )
}
