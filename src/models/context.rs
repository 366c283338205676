//! Business Context Model
//!
//! The summary fields derived from the business-context square of the
//! questionnaire. Extraction is deliberately lenient: answers arrive
//! loosely typed and anything that does not narrow cleanly is absent.

use serde::{Deserialize, Serialize};

use crate::models::question::{AnswerMap, AnswerValue};

/// Closed set of business models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessModel {
    #[serde(rename = "B2B")]
    B2b,
    #[serde(rename = "B2C")]
    B2c,
    #[serde(rename = "B2B2C")]
    B2b2c,
    #[serde(rename = "Marketplace")]
    Marketplace,
}

impl BusinessModel {
    /// Parse from the exact wire form; anything else is None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "B2B" => Some(Self::B2b),
            "B2C" => Some(Self::B2c),
            "B2B2C" => Some(Self::B2b2c),
            "Marketplace" => Some(Self::Marketplace),
            _ => None,
        }
    }
}

/// Marketing maturity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketingMaturity {
    Beginner,
    Intermediate,
    Advanced,
}

impl MarketingMaturity {
    /// Parse from the exact wire form; anything else is None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Business context summary extracted from questionnaire answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_model: Option<BusinessModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_in_operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_challenges: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_maturity: Option<MarketingMaturity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_availability: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub business_goals: Vec<String>,
}

impl BusinessContext {
    /// Derive the context summary from raw questionnaire answers.
    ///
    /// Narrowing rules:
    /// - text answers pass through; numeric answers are stringified where a
    ///   free-form field tolerates them (company size, budget, etc.)
    /// - closed-enum fields accept only exact members
    /// - list fields accept only list answers
    pub fn from_answers(answers: &AnswerMap) -> Self {
        Self {
            industry: text(answers, "industry"),
            business_model: text(answers, "business-model")
                .and_then(|s| BusinessModel::parse(&s)),
            company_size: text_or_number(answers, "company-size"),
            years_in_operation: text_or_number(answers, "years-in-operation"),
            geographic_scope: text_or_number(answers, "geographic-scope"),
            primary_challenges: list(answers, "primary-challenges"),
            marketing_maturity: text(answers, "marketing-maturity")
                .and_then(|s| MarketingMaturity::parse(&s)),
            marketing_budget: text_or_number(answers, "marketing-budget"),
            time_availability: text_or_number(answers, "time-availability"),
            business_goals: list(answers, "business-goals"),
        }
    }
}

fn text(answers: &AnswerMap, id: &str) -> Option<String> {
    answers.get(id).and_then(AnswerValue::as_text).map(String::from)
}

fn text_or_number(answers: &AnswerMap, id: &str) -> Option<String> {
    answers.get(id).and_then(AnswerValue::as_text_or_number_string)
}

fn list(answers: &AnswerMap, id: &str) -> Vec<String> {
    answers
        .get(id)
        .and_then(AnswerValue::as_list)
        .map(|items| items.to_vec())
        .unwrap_or_default()
}
