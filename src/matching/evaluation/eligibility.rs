use super::super::domain::{FeatureSnapshot, LenderProduct};

/// Evaluate the product's declared hard constraints against the snapshot.
///
/// Checks do not short-circuit: every failing constraint appends its own
/// reason, so one result can report several simultaneous disqualifiers.
pub(crate) fn constraint_reasons(
    product: &LenderProduct,
    snapshot: &FeatureSnapshot,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(min) = product.min_amount {
        if snapshot.amount_requested < min {
            reasons.push(format!(
                "requested amount {:.2} below product minimum {:.2}",
                snapshot.amount_requested, min
            ));
        }
    }

    if let Some(max) = product.max_amount {
        if snapshot.amount_requested > max {
            reasons.push(format!(
                "requested amount {:.2} above product maximum {:.2}",
                snapshot.amount_requested, max
            ));
        }
    }

    if let Some(floor) = product.min_monthly_revenue {
        if snapshot.monthly_revenue < floor {
            reasons.push(format!(
                "monthly revenue {:.2} below required {:.2}",
                snapshot.monthly_revenue, floor
            ));
        }
    }

    if let Some(floor) = product.min_time_in_business_months {
        if snapshot.time_in_business_months < floor {
            reasons.push(format!(
                "{} month(s) in business below required {}",
                snapshot.time_in_business_months, floor
            ));
        }
    }

    if let Some(floor) = product.min_credit_score {
        if snapshot.credit_score < floor {
            reasons.push(format!(
                "credit score {} below required {}",
                snapshot.credit_score, floor
            ));
        }
    }

    if let Some(allowed) = &product.industries_allowed {
        if !allowed.is_empty() && !allowed.contains(&snapshot.industry) {
            reasons.push(format!(
                "industry '{}' not on the allowed list",
                snapshot.industry
            ));
        }
    }

    if let Some(blocked) = &product.industries_blocked {
        if blocked.contains(&snapshot.industry) {
            reasons.push(format!(
                "industry '{}' is blocked for this product",
                snapshot.industry
            ));
        }
    }

    reasons
}
