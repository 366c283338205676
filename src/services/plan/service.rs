//! Plan Service
//!
//! Drives a submitted questionnaire through the generation pipeline:
//! insert as in_progress, analyze, generate, complete. Any failure along
//! the way is recorded on the plan row as failed with error metadata, so
//! the record always lands in a terminal state.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::normalize::normalize;
use super::submitter::PlanSubmitter;
use crate::models::context::BusinessContext;
use crate::models::plan::{Plan, PlanMetadata, PlanStatus};
use crate::models::question::AnswerMap;
use crate::services::generator::PlanGenerator;
use crate::storage::database::Database;
use crate::utils::error::{AppError, AppResult};

const PLAN_VERSION: &str = "1.0.0";

/// Creates, generates, and retrieves marketing plans
pub struct PlanService {
    db: Database,
    generator: Arc<dyn PlanGenerator>,
}

impl PlanService {
    /// Create a plan service over a database and a generation backend
    pub fn new(db: Database, generator: Arc<dyn PlanGenerator>) -> Self {
        Self { db, generator }
    }

    /// Create a plan row and run the full generation pipeline on it.
    ///
    /// Returns the plan id in every case where the row was created; a
    /// generation failure marks the row failed and still propagates the
    /// error so the caller can surface it.
    pub async fn create_and_generate(
        &self,
        user_id: &str,
        context: BusinessContext,
        responses: serde_json::Value,
    ) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();
        let started = Instant::now();

        let context_json = serde_json::to_string(&context)?;
        let responses_json = serde_json::to_string(&responses)?;

        self.db.insert_plan(
            &id,
            user_id,
            &context_json,
            &responses_json,
            PlanStatus::InProgress.as_str(),
            100.0,
            &Utc::now().to_rfc3339(),
        )?;
        debug!("created plan {} for user {}", id, user_id);

        match self.run_pipeline(&id, &context, &responses, started).await {
            Ok(()) => Ok(id),
            Err(e) => {
                self.record_failure(&id, &e);
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        id: &str,
        context: &BusinessContext,
        responses: &serde_json::Value,
        started: Instant,
    ) -> AppResult<()> {
        self.db.set_plan_status(
            id,
            PlanStatus::Analyzing.as_str(),
            &Utc::now().to_rfc3339(),
        )?;
        let analysis = self.generator.analyze(context, responses).await?;
        self.db.attach_analysis(
            id,
            &serde_json::to_string(&analysis)?,
            &Utc::now().to_rfc3339(),
        )?;

        self.db.set_plan_status(
            id,
            PlanStatus::Generating.as_str(),
            &Utc::now().to_rfc3339(),
        )?;
        let content = self.generator.generate(context, &analysis).await?;

        let metadata = PlanMetadata {
            total_processing_time: Some(started.elapsed().as_millis() as u64),
            generated_at: Some(Utc::now().to_rfc3339()),
            version: Some(PLAN_VERSION.to_string()),
            ..Default::default()
        };

        self.db.complete_plan(
            id,
            &serde_json::to_string(&content)?,
            &serde_json::to_string(&metadata)?,
            &Utc::now().to_rfc3339(),
        )?;
        debug!("plan {} completed via {}", id, self.generator.name());

        Ok(())
    }

    /// Mark the plan failed with error metadata. Best effort: a second
    /// failure here is logged, not surfaced over the original error.
    fn record_failure(&self, id: &str, error: &AppError) {
        let metadata = PlanMetadata {
            error: Some(error.to_string()),
            failed_at: Some(Utc::now().to_rfc3339()),
            version: Some(PLAN_VERSION.to_string()),
            ..Default::default()
        };

        let metadata_json = match serde_json::to_string(&metadata) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize failure metadata for {}: {}", id, e);
                return;
            }
        };

        if let Err(e) = self
            .db
            .fail_plan(id, &metadata_json, &Utc::now().to_rfc3339())
        {
            warn!("failed to mark plan {} as failed: {}", id, e);
        }
    }

    /// Fetch a plan in canonical normalized form
    pub fn get_plan(&self, id: &str) -> AppResult<Plan> {
        let raw = self
            .db
            .get_plan_raw(id)?
            .ok_or_else(|| AppError::not_found(format!("Plan not found: {}", id)))?;

        Ok(normalize(raw)?)
    }

    /// List plan ids for a user, most recently updated first
    pub fn list_plans(&self, user_id: &str) -> AppResult<Vec<String>> {
        self.db.list_plan_ids(user_id)
    }
}

#[async_trait]
impl PlanSubmitter for PlanService {
    async fn submit(
        &self,
        session_key: &str,
        context: BusinessContext,
        responses: AnswerMap,
    ) -> AppResult<String> {
        let responses = serde_json::to_value(&responses)?;
        self.create_and_generate(session_key, context, responses)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generator::StaticGenerator;

    struct BrokenGenerator;

    #[async_trait]
    impl PlanGenerator for BrokenGenerator {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn analyze(
            &self,
            _context: &BusinessContext,
            _responses: &serde_json::Value,
        ) -> AppResult<crate::models::plan::ClaudeAnalysis> {
            Err(AppError::generation("upstream unavailable"))
        }

        async fn generate(
            &self,
            _context: &BusinessContext,
            _analysis: &crate::models::plan::ClaudeAnalysis,
        ) -> AppResult<crate::models::plan::GeneratedContent> {
            Err(AppError::generation("upstream unavailable"))
        }
    }

    fn service_with(generator: Arc<dyn PlanGenerator>) -> PlanService {
        PlanService::new(Database::new_in_memory().unwrap(), generator)
    }

    fn sample_context() -> BusinessContext {
        BusinessContext {
            industry: Some("SaaS".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_pipeline_completes_plan() {
        let service = service_with(Arc::new(StaticGenerator::new()));

        let id = service
            .create_and_generate("user-1", sample_context(), serde_json::json!({"q": "a"}))
            .await
            .unwrap();

        let plan = service.get_plan(&id).unwrap();
        assert_eq!(plan.status, PlanStatus::Completed);
        assert_eq!(plan.user_id, "user-1");
        assert!(plan.claude_analysis.is_some());
        assert!(plan.generated_content.is_some());
        assert!(plan.completed_at.is_some());

        let metadata = plan.plan_metadata.unwrap();
        assert_eq!(metadata.version.as_deref(), Some(PLAN_VERSION));
        assert!(metadata.generated_at.is_some());
        assert!(metadata.error.is_none());
    }

    #[tokio::test]
    async fn test_generation_failure_lands_in_failed_state() {
        let service = service_with(Arc::new(BrokenGenerator));

        let err = service
            .create_and_generate("user-1", sample_context(), serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));

        // The row still exists and records the failure
        let ids = service.list_plans("user-1").unwrap();
        assert_eq!(ids.len(), 1);

        let plan = service.get_plan(&ids[0]).unwrap();
        assert_eq!(plan.status, PlanStatus::Failed);
        let metadata = plan.plan_metadata.unwrap();
        assert!(metadata.error.as_deref().unwrap().contains("upstream"));
        assert!(metadata.failed_at.is_some());
        assert!(plan.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_get_plan_missing_is_not_found() {
        let service = service_with(Arc::new(StaticGenerator::new()));
        let err = service.get_plan("ghost").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_submit_uses_session_key_as_owner() {
        let service = service_with(Arc::new(StaticGenerator::new()));

        let mut answers = AnswerMap::new();
        answers.insert(
            "industry".into(),
            crate::models::question::AnswerValue::Text("Retail".into()),
        );

        let id = service
            .submit("session-xyz", BusinessContext::from_answers(&answers), answers)
            .await
            .unwrap();

        let plan = service.get_plan(&id).unwrap();
        assert_eq!(plan.user_id, "session-xyz");
        assert_eq!(plan.business_context.industry.as_deref(), Some("Retail"));
        assert_eq!(plan.questionnaire_responses["industry"], "Retail");
    }
}
