//! Questionnaire Flow Integration Tests
//!
//! Exercises the full question catalog against a SQLite-backed draft store:
//! navigation, square completion, and resuming a session after an
//! interrupted run.

use std::sync::Arc;

use plan_forge::models::question::AnswerValue;
use plan_forge::services::generator::StaticGenerator;
use plan_forge::services::plan::PlanService;
use plan_forge::services::questionnaire::catalog;
use plan_forge::services::questionnaire::{
    AdvanceOutcome, DraftStore, FlowState, QuestionFlowController, SqliteDraftMedium,
};
use plan_forge::storage::database::Database;

fn controller_over(db: &Database, session_key: &str) -> QuestionFlowController {
    let submitter = Arc::new(PlanService::new(
        db.clone(),
        Arc::new(StaticGenerator::new()),
    ));
    let drafts = DraftStore::new(Box::new(SqliteDraftMedium::new(db.clone())));
    QuestionFlowController::new(catalog::all_questions(), drafts, submitter, session_key)
}

#[tokio::test]
async fn test_full_catalog_walkthrough_submits() {
    let db = Database::new_in_memory().unwrap();
    let mut flow = controller_over(&db, "session-walk");

    flow.record_answer("industry", AnswerValue::Text("SaaS".into()));
    flow.record_answer("business-model", AnswerValue::Text("B2B".into()));
    flow.record_answer(
        "primary-challenges",
        AnswerValue::List(vec!["Lead generation".into()]),
    );

    let total = flow.len();
    let mut outcome = AdvanceOutcome::Moved;
    for _ in 0..total {
        outcome = flow.advance().await.unwrap();
    }

    let AdvanceOutcome::Submitted { plan_id } = outcome else {
        panic!("expected submission, got {:?}", outcome);
    };
    assert_eq!(flow.state(), FlowState::Submitting);

    // Every square passed
    for square in 0..=9 {
        assert!(flow.completed_squares().contains(&square));
    }

    // The submission landed as a completed plan owned by the session
    let service = PlanService::new(db, Arc::new(StaticGenerator::new()));
    let plan = service.get_plan(&plan_id).unwrap();
    assert_eq!(plan.user_id, "session-walk");
    assert_eq!(plan.business_context.industry.as_deref(), Some("SaaS"));
}

#[tokio::test]
async fn test_draft_survives_session_restart() {
    let db = Database::new_in_memory().unwrap();

    {
        let mut flow = controller_over(&db, "session-resume");
        flow.record_answer("industry", AnswerValue::Text("Fitness".into()));
        flow.record_answer("company-size", AnswerValue::Number(8.0));
        flow.advance().await.unwrap();
        flow.advance().await.unwrap();
        // Controller dropped here: simulated reload
    }

    let flow = controller_over(&db, "session-resume");
    assert_eq!(
        flow.answers().get("industry"),
        Some(&AnswerValue::Text("Fitness".into()))
    );
    assert_eq!(
        flow.answers().get("company-size"),
        Some(&AnswerValue::Number(8.0))
    );
    // Position is not part of the draft; a fresh session starts at the top
    assert_eq!(flow.current_index(), 0);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let db = Database::new_in_memory().unwrap();

    let mut alpha = controller_over(&db, "session-alpha");
    alpha.record_answer("industry", AnswerValue::Text("Retail".into()));

    let beta = controller_over(&db, "session-beta");
    assert!(beta.answers().is_empty());
}

#[tokio::test]
async fn test_corrupt_draft_starts_clean() {
    let db = Database::new_in_memory().unwrap();
    db.set_draft("session-corrupt", "{not json at all").unwrap();

    let flow = controller_over(&db, "session-corrupt");
    assert!(flow.answers().is_empty());
    assert_eq!(flow.state(), FlowState::Navigating);
}

#[tokio::test]
async fn test_progress_climbs_monotonically() {
    let db = Database::new_in_memory().unwrap();
    let mut flow = controller_over(&db, "session-progress");

    let mut previous = flow.progress();
    assert_eq!(previous, 0.0);

    for _ in 0..flow.len() - 1 {
        flow.advance().await.unwrap();
        let current = flow.progress();
        assert!(current > previous);
        previous = current;
    }
    assert!(previous < 100.0);
}
