//! Question Flow Controller
//!
//! Owns the ordered question sequence, the current position, the answer map,
//! and per-square completion tracking. Drives forward/backward navigation
//! and hands the accumulated answers to the submission collaborator exactly
//! once when the sequence is exhausted.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::context::BusinessContext;
use crate::models::question::{AnswerMap, AnswerValue, Question};
use crate::services::plan::submitter::PlanSubmitter;
use crate::services::questionnaire::draft::DraftStore;
use crate::utils::error::AppResult;

/// Lifecycle state of the flow controller.
///
/// Navigating → Submitting on the terminal advance; Submitting → Failed on
/// submission error; Failed → Navigating only via [`QuestionFlowController::recover`].
/// Index movement within Navigating is not a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Navigating,
    Submitting,
    Failed,
}

/// Result of an [`QuestionFlowController::advance`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the next question
    Moved,
    /// Sequence exhausted; submission succeeded with the given plan id
    Submitted { plan_id: String },
    /// Nothing happened (empty sequence, or already submitting/submitted)
    Ignored,
}

/// Drives a user through the fixed questionnaire sequence.
///
/// One controller per browsing session; nothing is shared across sessions.
pub struct QuestionFlowController {
    questions: Vec<Question>,
    index: usize,
    answers: AnswerMap,
    completed_squares: BTreeSet<i32>,
    state: FlowState,
    session_key: String,
    drafts: DraftStore,
    submitter: Arc<dyn PlanSubmitter>,
}

impl QuestionFlowController {
    /// Create a controller over a fixed question sequence, hydrating any
    /// saved draft for the session key.
    pub fn new(
        questions: Vec<Question>,
        drafts: DraftStore,
        submitter: Arc<dyn PlanSubmitter>,
        session_key: impl Into<String>,
    ) -> Self {
        let session_key = session_key.into();
        let answers = drafts.hydrate(&session_key);
        if !answers.is_empty() {
            debug!(
                "hydrated {} draft answer(s) for session '{}'",
                answers.len(),
                session_key
            );
        }

        Self {
            questions,
            index: 0,
            answers,
            completed_squares: BTreeSet::new(),
            state: FlowState::Navigating,
            session_key,
            drafts,
            submitter,
        }
    }

    /// Record an answer, unconditionally overwriting any prior value for the
    /// question id, and write the full answer map through to the draft store.
    ///
    /// No validation against the question's kind or required flag happens
    /// here; that is the presentation layer's concern.
    pub fn record_answer(&mut self, question_id: impl Into<String>, value: AnswerValue) {
        self.answers.insert(question_id.into(), value);
        self.drafts.persist(&self.session_key, &self.answers);
    }

    /// Advance to the next question, or submit when the sequence is
    /// exhausted.
    ///
    /// Marks the current square complete when the following question belongs
    /// to a different square (and on the terminal advance, which passes the
    /// final square). Submission happens at most once: while Submitting, or
    /// after a successful submission, further calls are ignored.
    pub async fn advance(&mut self) -> AppResult<AdvanceOutcome> {
        if self.state != FlowState::Navigating {
            return Ok(AdvanceOutcome::Ignored);
        }

        let Some(current) = self.questions.get(self.index) else {
            return Ok(AdvanceOutcome::Ignored);
        };
        let current_square = current.square;

        match self.questions.get(self.index + 1) {
            Some(next) if next.square != current_square => {
                self.completed_squares.insert(current_square);
            }
            Some(_) => {}
            None => {
                self.completed_squares.insert(current_square);
            }
        }

        if self.index + 1 < self.questions.len() {
            self.index += 1;
            return Ok(AdvanceOutcome::Moved);
        }

        self.state = FlowState::Submitting;
        debug!("sequence exhausted for '{}', submitting", self.session_key);

        let context = BusinessContext::from_answers(&self.answers);
        match self
            .submitter
            .submit(&self.session_key, context, self.answers.clone())
            .await
        {
            Ok(plan_id) => {
                debug!("submission for '{}' created plan {}", self.session_key, plan_id);
                Ok(AdvanceOutcome::Submitted { plan_id })
            }
            Err(e) => {
                warn!("submission for '{}' failed: {}", self.session_key, e);
                self.state = FlowState::Failed;
                Err(e)
            }
        }
    }

    /// Move back one question; a no-op at the first question.
    /// Never alters square completion.
    pub fn retreat(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    /// Recover from a failed submission, re-entering Navigating at the last
    /// index so the user can retry. Only valid transition out of Failed.
    pub fn recover(&mut self) {
        if self.state == FlowState::Failed {
            self.state = FlowState::Navigating;
        }
    }

    /// The question at the current index, if the sequence is non-empty
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Current 0-based index
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Total number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Current flow state
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The accumulated answers
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Squares whose questions have all been passed (progress display only)
    pub fn completed_squares(&self) -> &BTreeSet<i32> {
        &self.completed_squares
    }

    /// Progress through the sequence as a percentage
    pub fn progress(&self) -> f32 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.index as f32 / self.questions.len() as f32) * 100.0
    }
}

impl std::fmt::Debug for QuestionFlowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionFlowController")
            .field("index", &self.index)
            .field("state", &self.state)
            .field("answered", &self.answers.len())
            .finish()
    }
}
