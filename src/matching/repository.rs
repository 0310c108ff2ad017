use super::domain::{
    ApplicationId, DecisionTrace, EngineVariant, FeatureSnapshot, LenderProduct, PolicyRule,
    RuleScope,
};

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to application feature snapshots, owned by the application
/// subsystem. The engine never writes through this boundary.
pub trait ApplicationStore: Send + Sync {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<FeatureSnapshot>, StoreError>;
}

/// Read access to the full active lender-product catalog.
pub trait ProductCatalog: Send + Sync {
    fn active_products(&self) -> Result<Vec<LenderProduct>, StoreError>;
}

/// Read access to policy rules filtered to the requested scopes.
pub trait PolicyStore: Send + Sync {
    fn rules_for(&self, scopes: &[RuleScope]) -> Result<Vec<PolicyRule>, StoreError>;
}

/// Read access to stored variant weight overrides.
pub trait VariantStore: Send + Sync {
    /// Absence of a stored variant is not an error; the resolver falls back
    /// to the configured defaults.
    fn fetch(&self, key: &str) -> Result<Option<EngineVariant>, StoreError>;
}

/// Append-only sink for decision traces.
pub trait TraceStore: Send + Sync {
    /// Appends one trace row. Each invocation appends a fresh row even for an
    /// identical `(application, variant)` pair; there is no idempotency key,
    /// so implementations that need dedup must key on their own input hash.
    fn append(&self, trace: DecisionTrace) -> Result<(), StoreError>;
}
