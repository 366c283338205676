//! Plan Forge
//!
//! A marketing-plan generation engine built around the 1-Page Marketing
//! Plan questionnaire. Walks a user through a fixed question sequence with
//! resumable drafts, derives a business-context summary from the answers,
//! and runs the result through a two-phase analysis/generation pipeline
//! into a persisted, exportable plan.

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use state::AppState;
pub use utils::error::{AppError, AppResult};
