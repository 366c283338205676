//! Questionnaire Services
//!
//! The question catalog, draft persistence, and the flow controller that
//! walks a user through the questionnaire and submits the finished answers.

pub mod catalog;
pub mod draft;
pub mod flow;

pub use draft::{DraftMedium, DraftStore, MemoryDraftMedium, SqliteDraftMedium};
pub use flow::{AdvanceOutcome, FlowState, QuestionFlowController};
