//! Data Models
//!
//! Core data structures shared across the engine: questionnaire questions
//! and answers, the derived business context, persisted plan records, and
//! application settings.

pub mod context;
pub mod plan;
pub mod question;
pub mod settings;

pub use context::{BusinessContext, BusinessModel, MarketingMaturity};
pub use plan::{
    ClaudeAnalysis, GeneratedContent, NormalizeError, Plan, PlanMetadata, PlanStatus,
    RawPlanRecord, RawTemporal,
};
pub use question::{AnswerMap, AnswerValue, ConditionOperator, Question, QuestionKind};
pub use settings::{AppConfig, SettingsUpdate};
