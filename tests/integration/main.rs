//! Integration Tests
//!
//! End-to-end tests for the plan engine: the questionnaire flow with draft
//! resume across sessions, and the full submit-generate-normalize-export
//! pipeline.
//!
//! All tests use in-memory SQLite databases via Database::new_in_memory()
//! and the offline generator. No network calls are made.

// Questionnaire flow and draft resume tests
mod questionnaire_flow_test;

// Submission-to-export pipeline tests
mod plan_pipeline_test;
