//! Lender-product matching and scoring engine.
//!
//! Given a loan application and a named scoring variant, the engine decides
//! which lender products the application is eligible for, applies layered
//! policy rules that can veto eligibility, computes a weighted match score per
//! product, ranks the eligible products, and appends an immutable decision
//! trace for after-the-fact review.
//!
//! The crate is a pure decision library: transports, persistence technology,
//! and experiment assignment are external collaborators reached through the
//! store traits in [`matching::repository`].

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;

pub use error::EngineError;
pub use matching::{DecisionResult, MatchService, DEFAULT_VARIANT};
