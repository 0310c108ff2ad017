use super::super::domain::{FeatureSnapshot, LenderProduct, ScoringWeights};

/// Compute the normalized, weighted match score for an eligible product.
///
/// Each feature normalizes into `[0, 1]` against the product's own bounds.
/// Every divisor carries a `max(1.0)` guard so degenerate catalog rows, e.g.
/// `min_amount == max_amount`, cannot divide by zero. The knob adjustment is
/// applied after the weighted sum, then the result is clamped to `[0, 1]` and
/// rounded to two decimal places.
pub(crate) fn match_score(
    product: &LenderProduct,
    snapshot: &FeatureSnapshot,
    weights: &ScoringWeights,
) -> f64 {
    let min_amount = product.min_amount.unwrap_or(0.0);
    let amount_cap = product.max_amount.or(product.min_amount).unwrap_or(1.0);
    let f_amount =
        clamp_unit((snapshot.amount_requested - min_amount) / (amount_cap - min_amount).max(1.0));

    let revenue_floor = product.min_monthly_revenue.unwrap_or(1.0).max(1.0);
    let f_mrr = clamp_unit(snapshot.monthly_revenue / revenue_floor);

    let tib_floor = f64::from(product.min_time_in_business_months.unwrap_or(1)).max(1.0);
    let f_tib = clamp_unit(f64::from(snapshot.time_in_business_months) / tib_floor);

    let credit_floor = f64::from(product.min_credit_score.unwrap_or(0));
    let f_cs = clamp_unit((f64::from(snapshot.credit_score) - credit_floor) / 200.0);

    let base = weights.amount * f_amount
        + weights.mrr * f_mrr
        + weights.tib * f_tib
        + weights.cs * f_cs;
    let adjusted = base + product.knobs.score_boost - product.knobs.out_of_box_penalty;

    round2(clamp_unit(adjusted))
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
