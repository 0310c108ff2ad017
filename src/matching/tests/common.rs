use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::matching::domain::{
    ApplicationId, DecisionTrace, EngineVariant, FeatureSnapshot, LenderProduct, PolicyRule,
    ProductKnobs, RuleScope,
};
use crate::matching::evaluation::DEFAULT_WEIGHTS;
use crate::matching::repository::{
    ApplicationStore, PolicyStore, ProductCatalog, StoreError, TraceStore, VariantStore,
};
use crate::matching::service::MatchService;

pub(super) fn application_id() -> ApplicationId {
    ApplicationId("app-000042".to_string())
}

/// Baseline retail applicant: 50k requested, 20k monthly revenue, 18 months
/// in business, credit score 680.
pub(super) fn snapshot() -> FeatureSnapshot {
    FeatureSnapshot {
        id: application_id(),
        amount_requested: 50_000.0,
        product_category: "working_capital".to_string(),
        monthly_revenue: 20_000.0,
        time_in_business_months: 18,
        industry: "retail".to_string(),
        credit_score: 680,
    }
}

/// Baseline term-loan product: 10k to 100k, 5k revenue floor, 6 months in
/// business, credit floor 600, no industry lists.
pub(super) fn term_loan() -> LenderProduct {
    LenderProduct {
        key: "term-loan".to_string(),
        name: "Standard Term Loan".to_string(),
        min_amount: Some(10_000.0),
        max_amount: Some(100_000.0),
        min_monthly_revenue: Some(5_000.0),
        min_time_in_business_months: Some(6),
        min_credit_score: Some(600),
        industries_allowed: None,
        industries_blocked: None,
        rate_apr: 0.189,
        term_months: 24,
        knobs: ProductKnobs::default(),
    }
}

/// A product with no constraints at all.
pub(super) fn unconstrained(key: &str) -> LenderProduct {
    LenderProduct {
        key: key.to_string(),
        name: format!("Product {key}"),
        min_amount: None,
        max_amount: None,
        min_monthly_revenue: None,
        min_time_in_business_months: None,
        min_credit_score: None,
        industries_allowed: None,
        industries_blocked: None,
        rate_apr: 0.25,
        term_months: 12,
        knobs: ProductKnobs::default(),
    }
}

pub(super) fn blocked_industries(key: &str, industries: &[&str]) -> LenderProduct {
    let mut product = unconstrained(key);
    product.industries_blocked = Some(
        industries
            .iter()
            .map(|industry| industry.to_string())
            .collect(),
    );
    product
}

pub(super) fn global_rule(rule: &str) -> PolicyRule {
    PolicyRule {
        scope: RuleScope::Global,
        rule: rule.to_string(),
    }
}

pub(super) fn product_rule(key: &str, rule: &str) -> PolicyRule {
    PolicyRule {
        scope: RuleScope::Product(key.to_string()),
        rule: rule.to_string(),
    }
}

pub(super) fn application_rule(rule: &str) -> PolicyRule {
    PolicyRule {
        scope: RuleScope::Application(application_id()),
        rule: rule.to_string(),
    }
}

#[derive(Default)]
pub(super) struct MemoryApplications {
    records: HashMap<ApplicationId, FeatureSnapshot>,
}

impl MemoryApplications {
    pub(super) fn with(snapshot: FeatureSnapshot) -> Self {
        let mut records = HashMap::new();
        records.insert(snapshot.id.clone(), snapshot);
        Self { records }
    }
}

impl ApplicationStore for MemoryApplications {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<FeatureSnapshot>, StoreError> {
        Ok(self.records.get(id).cloned())
    }
}

pub(super) struct MemoryCatalog {
    pub(super) products: Vec<LenderProduct>,
}

impl ProductCatalog for MemoryCatalog {
    fn active_products(&self) -> Result<Vec<LenderProduct>, StoreError> {
        Ok(self.products.clone())
    }
}

#[derive(Default)]
pub(super) struct MemoryPolicies {
    pub(super) rules: Vec<PolicyRule>,
}

impl PolicyStore for MemoryPolicies {
    fn rules_for(&self, scopes: &[RuleScope]) -> Result<Vec<PolicyRule>, StoreError> {
        Ok(self
            .rules
            .iter()
            .filter(|rule| scopes.contains(&rule.scope))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryVariants {
    pub(super) variants: HashMap<String, EngineVariant>,
}

impl VariantStore for MemoryVariants {
    fn fetch(&self, key: &str) -> Result<Option<EngineVariant>, StoreError> {
        Ok(self.variants.get(key).cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryTraces {
    records: Arc<Mutex<Vec<DecisionTrace>>>,
}

impl MemoryTraces {
    pub(super) fn records(&self) -> Vec<DecisionTrace> {
        self.records.lock().expect("trace mutex poisoned").clone()
    }
}

impl TraceStore for MemoryTraces {
    fn append(&self, trace: DecisionTrace) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("trace mutex poisoned")
            .push(trace);
        Ok(())
    }
}

/// Trace sink that always fails, for the trace-is-a-side-effect tests.
pub(super) struct FailingTraces;

impl TraceStore for FailingTraces {
    fn append(&self, _trace: DecisionTrace) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("trace store offline".to_string()))
    }
}

pub(super) struct UnavailableApplications;

impl ApplicationStore for UnavailableApplications {
    fn fetch(&self, _id: &ApplicationId) -> Result<Option<FeatureSnapshot>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) type TestService =
    MatchService<MemoryApplications, MemoryCatalog, MemoryPolicies, MemoryVariants, MemoryTraces>;

pub(super) fn build_service(
    products: Vec<LenderProduct>,
    rules: Vec<PolicyRule>,
    variants: Vec<EngineVariant>,
) -> (TestService, Arc<MemoryTraces>) {
    let traces = Arc::new(MemoryTraces::default());
    let variants = MemoryVariants {
        variants: variants
            .into_iter()
            .map(|variant| (variant.key.clone(), variant))
            .collect(),
    };
    let service = MatchService::new(
        Arc::new(MemoryApplications::with(snapshot())),
        Arc::new(MemoryCatalog { products }),
        Arc::new(MemoryPolicies { rules }),
        Arc::new(variants),
        traces.clone(),
        DEFAULT_WEIGHTS,
    );
    (service, traces)
}
