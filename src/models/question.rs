//! Questionnaire Question Models
//!
//! Data structures for the fixed questionnaire: questions, answer values,
//! and conditional-display rules. Questions are immutable configuration;
//! answers accumulate in an [`AnswerMap`] keyed by question id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Input kind for a question's answer control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Textarea,
    Select,
    Multiselect,
    Radio,
    Checkbox,
    Range,
}

impl QuestionKind {
    /// Whether this kind requires an option list to render
    pub fn requires_options(&self) -> bool {
        matches!(
            self,
            QuestionKind::Select
                | QuestionKind::Multiselect
                | QuestionKind::Radio
                | QuestionKind::Checkbox
        )
    }
}

/// A single answer value.
///
/// Variant order matters for untagged deserialization: booleans and numbers
/// must be tried before strings and lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Get the text content, if this is a text answer
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the numeric content, if this is a numeric answer
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the list content, if this is a list answer
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the boolean content, if this is a flag answer
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AnswerValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Stringify text and numeric answers; other kinds yield None.
    ///
    /// Mirrors the narrowing applied when deriving summary fields from
    /// free-form answers: a numeric "company size" is as valid as a
    /// textual one.
    pub fn as_text_or_number_string(&self) -> Option<String> {
        match self {
            AnswerValue::Text(s) => Some(s.clone()),
            AnswerValue::Number(n) => Some(format_number(*n)),
            _ => None,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Flag(b)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        AnswerValue::List(items)
    }
}

/// Format a number without a trailing ".0" for whole values
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Mapping from question id to answer value, unique per session
pub type AnswerMap = HashMap<String, AnswerValue>;

/// Comparison operator for conditional-display rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    Includes,
    GreaterThan,
    LessThan,
}

/// Conditional-display rule gating a question on a prior answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    /// Question id whose answer is inspected
    pub field: String,
    /// Comparison operator
    pub operator: ConditionOperator,
    /// Comparison value
    pub value: AnswerValue,
}

impl ConditionalRule {
    /// Evaluate the rule against the current answer map.
    ///
    /// A missing answer never satisfies a rule.
    pub fn is_satisfied(&self, answers: &AnswerMap) -> bool {
        let Some(answer) = answers.get(&self.field) else {
            return false;
        };

        match self.operator {
            ConditionOperator::Equals => answer == &self.value,
            ConditionOperator::Includes => match (answer.as_list(), self.value.as_text()) {
                (Some(items), Some(needle)) => items.iter().any(|item| item == needle),
                _ => false,
            },
            ConditionOperator::GreaterThan => match (answer.as_number(), self.value.as_number()) {
                (Some(a), Some(b)) => a > b,
                _ => false,
            },
            ConditionOperator::LessThan => match (answer.as_number(), self.value.as_number()) {
                (Some(a), Some(b)) => a < b,
                _ => false,
            },
        }
    }
}

/// A single question in the questionnaire sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique question id (e.g. "industry", "target-demographics")
    pub id: String,
    /// Square (section) this question belongs to; 0 is business context
    pub square: i32,
    /// The prompt text displayed to the user
    pub text: String,
    /// Input kind
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Option list, present iff the kind requires one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Whether an answer is required before advancing
    pub required: bool,
    /// Optional help text shown alongside the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Optional input placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Optional validation constraints (min/max length, etc.)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub validation: HashMap<String, serde_json::Value>,
    /// Optional conditional-display rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<ConditionalRule>,
}

impl Question {
    /// Create a new required question with the given id, square, prompt and kind
    pub fn new(
        id: impl Into<String>,
        square: i32,
        text: impl Into<String>,
        kind: QuestionKind,
    ) -> Self {
        Self {
            id: id.into(),
            square,
            text: text.into(),
            kind,
            options: None,
            required: true,
            help_text: None,
            placeholder: None,
            validation: HashMap::new(),
            conditional: None,
        }
    }

    /// Attach an option list
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Mark the question optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }

    /// Attach an input placeholder
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Attach a conditional-display rule
    pub fn with_conditional(
        mut self,
        field: impl Into<String>,
        operator: ConditionOperator,
        value: AnswerValue,
    ) -> Self {
        self.conditional = Some(ConditionalRule {
            field: field.into(),
            operator,
            value,
        });
        self
    }

    /// Whether this question should be displayed given the current answers.
    ///
    /// Presentation-layer concern: the flow controller's index arithmetic
    /// treats all questions uniformly regardless of visibility.
    pub fn is_visible(&self, answers: &AnswerMap) -> bool {
        self.conditional
            .as_ref()
            .map_or(true, |rule| rule.is_satisfied(answers))
    }
}
