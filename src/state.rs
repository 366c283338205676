//! Application State
//!
//! Global state for the engine's host application, containing all services.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::generator::{ClaudeGenerator, PlanGenerator, StaticGenerator};
use crate::services::plan::PlanService;
use crate::services::questionnaire::{DraftStore, QuestionFlowController, SqliteDraftMedium};
use crate::services::questionnaire::catalog;
use crate::storage::{ConfigService, Database};
use crate::utils::error::{AppError, AppResult};

/// Application state holding the shared services
pub struct AppState {
    /// SQLite database with connection pool
    database: Arc<RwLock<Option<Database>>>,
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            database: Arc::new(RwLock::new(None)),
            config: Arc::new(RwLock::new(None)),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize all services from their default on-disk locations
    pub async fn initialize(&self) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        {
            let db = Database::new()?;
            let mut db_lock = self.database.write().await;
            *db_lock = Some(db);
        }

        {
            let config = ConfigService::new()?;
            let mut config_lock = self.config.write().await;
            *config_lock = Some(config);
        }

        *initialized = true;
        Ok(())
    }

    /// Initialize with pre-built services (tests)
    pub async fn initialize_with(&self, db: Database, config: ConfigService) {
        let mut db_lock = self.database.write().await;
        *db_lock = Some(db);
        drop(db_lock);

        let mut config_lock = self.config.write().await;
        *config_lock = Some(config);
        drop(config_lock);

        let mut initialized = self.initialized.write().await;
        *initialized = true;
    }

    /// Get a handle to the database
    pub async fn database(&self) -> AppResult<Database> {
        let guard = self.database.read().await;
        match &*guard {
            Some(db) => Ok(db.clone()),
            None => Err(AppError::database("Database not initialized")),
        }
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update settings with a partial update and persist them
    pub async fn update_settings(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut guard = self.config.write().await;
        match &mut *guard {
            Some(config) => config.update_config(update),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Build the plan service over the configured generation backend.
    ///
    /// With an API key configured plans generate via Claude; without one the
    /// offline templated generator keeps the pipeline usable.
    pub async fn plan_service(&self) -> AppResult<PlanService> {
        let db = self.database().await?;
        let config = self.get_config().await?;

        let generator: Arc<dyn PlanGenerator> = if config.api_key.is_some() {
            Arc::new(ClaudeGenerator::from_config(&config)?)
        } else {
            Arc::new(StaticGenerator::new())
        };

        Ok(PlanService::new(db, generator))
    }

    /// Start (or resume) a questionnaire session.
    ///
    /// Drafts for the session key are hydrated from the database, so an
    /// interrupted session picks up its saved answers.
    pub async fn start_questionnaire(
        &self,
        session_key: &str,
    ) -> AppResult<QuestionFlowController> {
        let db = self.database().await?;
        let submitter = Arc::new(self.plan_service().await?);
        let drafts = DraftStore::new(Box::new(SqliteDraftMedium::new(db)));

        Ok(QuestionFlowController::new(
            catalog::all_questions(),
            drafts,
            submitter,
            session_key,
        ))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::AnswerValue;
    use crate::services::questionnaire::AdvanceOutcome;

    async fn initialized_state() -> (AppState, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ConfigService::with_path(temp_dir.path().join("config.json")).unwrap();
        let state = AppState::new();
        state
            .initialize_with(Database::new_in_memory().unwrap(), config)
            .await;
        (state, temp_dir)
    }

    #[tokio::test]
    async fn test_uninitialized_state_errors() {
        let state = AppState::new();
        assert!(state.database().await.is_err());
        assert!(state.get_config().await.is_err());
        assert!(state.plan_service().await.is_err());
    }

    #[tokio::test]
    async fn test_settings_update_persists() {
        let (state, _dir) = initialized_state().await;

        let updated = state
            .update_settings(SettingsUpdate {
                max_tokens: Some(2048),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.max_tokens, 2048);
        assert_eq!(state.get_config().await.unwrap().max_tokens, 2048);
    }

    #[tokio::test]
    async fn test_questionnaire_submits_through_offline_generator() {
        let (state, _dir) = initialized_state().await;

        // No API key configured, so the offline backend carries the session
        let mut flow = state.start_questionnaire("session-state").await.unwrap();
        flow.record_answer("industry", AnswerValue::Text("SaaS".into()));

        let total = flow.len();
        let mut outcome = AdvanceOutcome::Moved;
        for _ in 0..total {
            outcome = flow.advance().await.unwrap();
        }

        let AdvanceOutcome::Submitted { plan_id } = outcome else {
            panic!("expected submission, got {:?}", outcome);
        };

        let plan = state.plan_service().await.unwrap().get_plan(&plan_id).unwrap();
        assert_eq!(plan.user_id, "session-state");
        assert_eq!(plan.business_context.industry.as_deref(), Some("SaaS"));
    }

    #[tokio::test]
    async fn test_questionnaire_resumes_draft_across_controllers() {
        let (state, _dir) = initialized_state().await;

        let mut flow = state.start_questionnaire("session-resume").await.unwrap();
        flow.record_answer("industry", AnswerValue::Text("Retail".into()));
        drop(flow);

        let resumed = state.start_questionnaire("session-resume").await.unwrap();
        assert_eq!(
            resumed.answers().get("industry"),
            Some(&AnswerValue::Text("Retail".into()))
        );
    }
}
