//! crates/nutriflow_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the specific hosted-model API behind them.

use crate::domain::{MealPlan, UserProfile};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the external model API.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait MealPlanService: Send + Sync {
    /// Generates a personalized multi-day meal plan from a user profile.
    ///
    /// The profile values are embedded verbatim in the prompt; the reply is
    /// expected to match the declared plan schema. There is no retry and no
    /// plausibility validation of the returned macros.
    async fn generate_plan(&self, profile: &UserProfile) -> PortResult<MealPlan>;
}

#[async_trait]
pub trait ArticleService: Send + Sync {
    /// Generates a plain-text blog article for the given topic title.
    /// Paragraphs are separated by blank lines; no length enforcement.
    async fn generate_article(&self, topic_title: &str) -> PortResult<String>;
}
