use crate::matching::domain::ApplicationId;
use crate::matching::repository::StoreError;

/// Error raised by the matching engine.
///
/// `ApplicationNotFound` is surfaced as its own kind so callers can
/// distinguish it from infrastructure failures; it aborts the run before any
/// scoring. Missing variants and malformed policy rules are deliberately not
/// errors (they degrade to defaults and passthroughs respectively).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("application {0} not found")]
    ApplicationNotFound(ApplicationId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
