use super::domain::ProductResult;

/// Number of ranked results surfaced in the `top` list.
pub(crate) const TOP_RESULTS: usize = 5;

/// Sort results descending by score. The sort is stable, so products with
/// equal scores keep their catalog order; no further tie-break is applied.
pub(crate) fn rank(results: &mut [ProductResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// The ranked eligible results, capped at `TOP_RESULTS`. Expects `results`
/// to already be ranked.
pub(crate) fn top_ranked(results: &[ProductResult]) -> Vec<ProductResult> {
    results
        .iter()
        .filter(|result| result.eligible)
        .take(TOP_RESULTS)
        .cloned()
        .collect()
}
