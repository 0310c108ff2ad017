use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error};

use super::domain::{ApplicationId, DecisionResult, DecisionTrace, RuleScope, ScoringWeights};
use super::evaluation::{self, LoadedRule};
use super::ranking;
use super::repository::{
    ApplicationStore, PolicyStore, ProductCatalog, TraceStore, VariantStore,
};
use crate::error::EngineError;

/// Variant evaluated when the caller does not name one.
pub const DEFAULT_VARIANT: &str = "prod";

/// Service composing the read stores, the evaluation pipeline, and the trace
/// sink. Holds no mutable state of its own, so one instance can serve
/// concurrent invocations for different applications or variants.
pub struct MatchService<A, P, R, V, T> {
    applications: Arc<A>,
    products: Arc<P>,
    policies: Arc<R>,
    variants: Arc<V>,
    traces: Arc<T>,
    defaults: ScoringWeights,
}

impl<A, P, R, V, T> MatchService<A, P, R, V, T>
where
    A: ApplicationStore + 'static,
    P: ProductCatalog + 'static,
    R: PolicyStore + 'static,
    V: VariantStore + 'static,
    T: TraceStore + 'static,
{
    pub fn new(
        applications: Arc<A>,
        products: Arc<P>,
        policies: Arc<R>,
        variants: Arc<V>,
        traces: Arc<T>,
        defaults: ScoringWeights,
    ) -> Self {
        Self {
            applications,
            products,
            policies,
            variants,
            traces,
            defaults,
        }
    }

    /// Run the matching pipeline for one `(application, variant)` pair.
    ///
    /// Fatal errors: an unknown application, or a read failure on any store.
    /// A missing variant only triggers the default-weight fallback, and a
    /// trace append failure is logged without suppressing the result.
    pub fn run(
        &self,
        application_id: &ApplicationId,
        variant: &str,
    ) -> Result<DecisionResult, EngineError> {
        let snapshot = self
            .applications
            .fetch(application_id)?
            .ok_or_else(|| EngineError::ApplicationNotFound(application_id.clone()))?;

        let stored_variant = self.variants.fetch(variant)?;
        if stored_variant.is_none() {
            debug!(variant, "no stored variant, using default weights");
        }
        let weights = evaluation::weights::resolve(stored_variant.as_ref(), &self.defaults);

        let products = self.products.active_products()?;

        let mut scopes = Vec::with_capacity(products.len() + 2);
        scopes.push(RuleScope::Global);
        scopes.push(RuleScope::Application(application_id.clone()));
        scopes.extend(
            products
                .iter()
                .map(|product| RuleScope::Product(product.key.clone())),
        );

        let rules: Vec<LoadedRule> = self
            .policies
            .rules_for(&scopes)?
            .into_iter()
            .map(LoadedRule::from)
            .collect();

        let mut all = Vec::with_capacity(products.len());
        let mut rules_applied = Vec::new();
        for product in &products {
            let (result, hits) =
                evaluation::evaluate_product(product, &snapshot, &weights, &rules, application_id);
            rules_applied.extend(hits);
            all.push(result);
        }

        ranking::rank(&mut all);
        let top = ranking::top_ranked(&all);

        let trace = DecisionTrace {
            application_id: application_id.clone(),
            variant: variant.to_string(),
            weights,
            results: all.clone(),
            rules_applied: rules_applied.clone(),
            inputs: snapshot.clone(),
            created_at: Utc::now(),
        };
        if let Err(cause) = self.traces.append(trace) {
            error!(%application_id, variant, %cause, "failed to append decision trace");
        }

        Ok(DecisionResult {
            application_id: application_id.clone(),
            variant: variant.to_string(),
            weights,
            top,
            all,
            rules_applied,
            inputs: snapshot,
        })
    }

    /// Run against the default variant.
    pub fn run_default(&self, application_id: &ApplicationId) -> Result<DecisionResult, EngineError> {
        self.run(application_id, DEFAULT_VARIANT)
    }
}
