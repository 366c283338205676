//! Plan Submission Trait
//!
//! The seam between the questionnaire flow and whatever creates the
//! downstream plan artifact. The flow controller hands the completed answer
//! set across this boundary exactly once and forwards the returned plan id
//! without interpreting it.

use async_trait::async_trait;

use crate::models::context::BusinessContext;
use crate::models::question::AnswerMap;
use crate::utils::error::AppResult;

/// Accepts a completed answer set and produces a downstream plan artifact.
#[async_trait]
pub trait PlanSubmitter: Send + Sync {
    /// Submit the final answers (plus the derived business-context summary)
    /// for the given session, returning the created plan id.
    async fn submit(
        &self,
        session_key: &str,
        context: BusinessContext,
        responses: AnswerMap,
    ) -> AppResult<String>;
}
