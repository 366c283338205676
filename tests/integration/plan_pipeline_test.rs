//! Plan Pipeline Integration Tests
//!
//! The submit-generate-normalize-export path over an in-memory database
//! with the offline generator, plus the failure path landing in a terminal
//! failed state with error metadata.

use std::sync::Arc;

use async_trait::async_trait;

use plan_forge::models::context::BusinessContext;
use plan_forge::models::plan::{ClaudeAnalysis, GeneratedContent, PlanStatus};
use plan_forge::services::document::{document_filename, render_plan_markdown};
use plan_forge::services::generator::{PlanGenerator, StaticGenerator};
use plan_forge::services::plan::{normalize, PlanService};
use plan_forge::storage::database::Database;
use plan_forge::utils::error::{AppError, AppResult};

fn sample_context() -> BusinessContext {
    BusinessContext {
        industry: Some("Landscaping".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_submission_to_rendered_document() {
    let service = PlanService::new(
        Database::new_in_memory().unwrap(),
        Arc::new(StaticGenerator::new()),
    );

    let id = service
        .create_and_generate(
            "owner@example.com",
            sample_context(),
            serde_json::json!({"industry": "Landscaping"}),
        )
        .await
        .unwrap();

    let plan = service.get_plan(&id).unwrap();
    assert_eq!(plan.status, PlanStatus::Completed);
    assert!(plan.completed_at.is_some());

    let doc = render_plan_markdown(&plan).unwrap();
    assert!(doc.contains("# 1-Page Marketing Plan: Landscaping"));
    assert!(doc.contains("## BEFORE (Prospects)"));
    assert!(doc.contains("## Implementation Guide"));

    assert!(document_filename(&plan).ends_with(".md"));
}

#[tokio::test]
async fn test_stored_record_normalizes_from_text_columns() {
    let db = Database::new_in_memory().unwrap();
    let service = PlanService::new(db.clone(), Arc::new(StaticGenerator::new()));

    let id = service
        .create_and_generate("u", sample_context(), serde_json::json!({}))
        .await
        .unwrap();

    // Everything in SQLite is text; the normalizer owns the shape decisions
    let raw = db.get_plan_raw(&id).unwrap().unwrap();
    assert!(matches!(raw.business_context, serde_json::Value::String(_)));
    assert!(matches!(
        raw.generated_content,
        Some(serde_json::Value::String(_))
    ));

    let plan = normalize(raw).unwrap();
    assert_eq!(
        plan.business_context.industry.as_deref(),
        Some("Landscaping")
    );
    assert!(plan.generated_content.is_some());

    // Normalizing the already-structured form converges to the same plan
    assert_eq!(normalize(plan.to_raw()).unwrap(), plan);
}

struct FailsDuringContent;

#[async_trait]
impl PlanGenerator for FailsDuringContent {
    fn name(&self) -> &'static str {
        "fails-during-content"
    }

    async fn analyze(
        &self,
        context: &BusinessContext,
        responses: &serde_json::Value,
    ) -> AppResult<ClaudeAnalysis> {
        StaticGenerator::new().analyze(context, responses).await
    }

    async fn generate(
        &self,
        _context: &BusinessContext,
        _analysis: &ClaudeAnalysis,
    ) -> AppResult<GeneratedContent> {
        Err(AppError::generation("content phase exploded"))
    }
}

#[tokio::test]
async fn test_late_failure_keeps_analysis_and_records_error() {
    let service = PlanService::new(
        Database::new_in_memory().unwrap(),
        Arc::new(FailsDuringContent),
    );

    let err = service
        .create_and_generate("u", sample_context(), serde_json::json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Generation(_)));

    let ids = service.list_plans("u").unwrap();
    let plan = service.get_plan(&ids[0]).unwrap();

    assert_eq!(plan.status, PlanStatus::Failed);
    // The analysis phase finished before the failure and is preserved
    assert!(plan.claude_analysis.is_some());
    assert!(plan.generated_content.is_none());

    let metadata = plan.plan_metadata.unwrap();
    assert!(metadata.error.as_deref().unwrap().contains("exploded"));
    assert!(metadata.failed_at.is_some());

    // A failed plan has nothing to export
    let plan = service.get_plan(&ids[0]).unwrap();
    assert!(render_plan_markdown(&plan).is_err());
}

#[tokio::test]
async fn test_plans_listed_most_recent_first() {
    let service = PlanService::new(
        Database::new_in_memory().unwrap(),
        Arc::new(StaticGenerator::new()),
    );

    let first = service
        .create_and_generate("u", sample_context(), serde_json::json!({}))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = service
        .create_and_generate("u", sample_context(), serde_json::json!({}))
        .await
        .unwrap();

    let ids = service.list_plans("u").unwrap();
    assert_eq!(ids, vec![second, first]);
}
