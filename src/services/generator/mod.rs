//! Plan Generation Providers
//!
//! The two-phase generation seam: a provider first analyzes the business
//! from the questionnaire responses, then turns that analysis into the
//! rendered plan content. Implementations are swappable behind the
//! [`PlanGenerator`] trait so the pipeline never cares which backend
//! produced the payloads.

pub mod claude;
pub mod fallback;

pub use claude::ClaudeGenerator;
pub use fallback::StaticGenerator;

use async_trait::async_trait;

use crate::models::context::BusinessContext;
use crate::models::plan::{ClaudeAnalysis, GeneratedContent};
use crate::utils::error::AppResult;

/// A backend capable of producing plan analysis and content.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Phase one: analyze the business from its context and raw responses
    async fn analyze(
        &self,
        context: &BusinessContext,
        responses: &serde_json::Value,
    ) -> AppResult<ClaudeAnalysis>;

    /// Phase two: generate the plan content from the analysis
    async fn generate(
        &self,
        context: &BusinessContext,
        analysis: &ClaudeAnalysis,
    ) -> AppResult<GeneratedContent>;
}
