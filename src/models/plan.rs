//! Plan Models
//!
//! Data structures for persisted marketing plans: the raw record shape as it
//! comes out of storage (JSON-capable fields possibly still serialized as
//! text) and the canonical normalized [`Plan`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::context::BusinessContext;

/// Status of a plan in the generation pipeline.
///
/// Closed enumeration: downstream routing matches on exact members, so an
/// unrecognized stored value is a normalization error, never a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    InProgress,
    Analyzing,
    Generating,
    Completed,
    Failed,
}

impl PlanStatus {
    /// Get the string form for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Analyzing => "analyzing",
            Self::Generating => "generating",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parse from the stored string form; unknown values yield None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in_progress" => Some(Self::InProgress),
            "analyzing" => Some(Self::Analyzing),
            "generating" => Some(Self::Generating),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SWOT-style assessment of the business model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessModelAssessment {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub threats: Vec<String>,
}

/// Market opportunity assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketOpportunity {
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub growth: String,
    #[serde(default)]
    pub trends: Vec<String>,
    #[serde(default)]
    pub barriers: Vec<String>,
}

/// Competitive positioning assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitivePositioning {
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub advantages: Vec<String>,
    #[serde(default)]
    pub differentiators: Vec<String>,
}

/// A refined customer avatar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAvatar {
    #[serde(default)]
    pub demographics: HashMap<String, String>,
    #[serde(default)]
    pub psychographics: HashMap<String, String>,
    #[serde(default)]
    pub pain_points: Vec<String>,
}

/// Avatar refinement section of the analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAvatarRefinement {
    #[serde(default)]
    pub primary_avatar: CustomerAvatar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_avatars: Option<Vec<CustomerAvatar>>,
}

/// Growth potential assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPotential {
    #[serde(default)]
    pub short_term: String,
    #[serde(default)]
    pub long_term: String,
    #[serde(default)]
    pub scalability: String,
    #[serde(default)]
    pub investment_needed: String,
}

/// The AI analysis produced from the questionnaire responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudeAnalysis {
    #[serde(default)]
    pub business_model_assessment: BusinessModelAssessment,
    #[serde(default)]
    pub market_opportunity: MarketOpportunity,
    #[serde(default)]
    pub competitive_positioning: CompetitivePositioning,
    #[serde(default)]
    pub customer_avatar_refinement: CustomerAvatarRefinement,
    #[serde(default)]
    pub strategic_recommendations: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub growth_potential: GrowthPotential,
}

/// BEFORE section of the one-page plan (prospects)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanBefore {
    pub target_market: String,
    pub message: String,
    #[serde(default)]
    pub media: Vec<String>,
}

/// DURING section of the one-page plan (leads)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDuring {
    pub lead_capture: String,
    pub lead_nurture: String,
    pub sales_conversion: String,
}

/// AFTER section of the one-page plan (customers)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAfter {
    pub deliver_experience: String,
    pub lifetime_value: String,
    pub referrals: String,
}

/// The one-page marketing plan grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnePagePlan {
    pub before: PlanBefore,
    pub during: PlanDuring,
    pub after: PlanAfter,
}

/// Phased action plans for the implementation guide
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlans {
    pub phase1: String,
    pub phase2: String,
    pub phase3: String,
}

/// Implementation guide accompanying the one-page plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuide {
    pub executive_summary: String,
    pub action_plans: ActionPlans,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub resources: String,
    #[serde(default)]
    pub kpis: String,
    #[serde(default)]
    pub templates: String,
}

/// Strategic insights section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicInsights {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub positioning: String,
    #[serde(default)]
    pub competitive_advantage: String,
    #[serde(default)]
    pub growth_potential: String,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub investments: Vec<String>,
    #[serde(default)]
    pub roi: String,
}

/// The generated plan content rendered to the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub one_page_plan: OnePagePlan,
    pub implementation_guide: ImplementationGuide,
    pub strategic_insights: StrategicInsights,
}

/// Processing metadata attached to a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    /// Total generation wall time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_processing_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<String>,
}

/// A temporal value as it arrives from storage: either already parsed or
/// still text. Untagged so RFC 3339 strings deserialize straight into the
/// parsed variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTemporal {
    Parsed(DateTime<Utc>),
    Text(String),
}

impl From<DateTime<Utc>> for RawTemporal {
    fn from(dt: DateTime<Utc>) -> Self {
        RawTemporal::Parsed(dt)
    }
}

/// A plan record as it comes out of the persisted-record source.
///
/// JSON-capable fields are `serde_json::Value`: a `Value::String` means the
/// store returned serialized text; anything else is already structured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlanRecord {
    pub id: String,
    pub user_id: String,
    pub business_context: serde_json::Value,
    pub questionnaire_responses: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_analysis: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_metadata: Option<serde_json::Value>,
    pub status: String,
    pub completion_percentage: f64,
    pub created_at: RawTemporal,
    pub updated_at: RawTemporal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<RawTemporal>,
}

/// The canonical, fully normalized plan record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub user_id: String,
    pub business_context: BusinessContext,
    /// Structured questionnaire responses (shape varies by questionnaire
    /// version, so this stays a JSON value rather than a fixed struct)
    pub questionnaire_responses: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_analysis: Option<ClaudeAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<GeneratedContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_metadata: Option<PlanMetadata>,
    pub status: PlanStatus,
    pub completion_percentage: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Plan {
    /// Re-express this plan in raw-record form with every field already
    /// structured. Normalizing the result is a no-op, which is what makes
    /// normalization idempotent.
    pub fn to_raw(&self) -> RawPlanRecord {
        RawPlanRecord {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            business_context: serde_json::to_value(&self.business_context)
                .unwrap_or(serde_json::Value::Null),
            questionnaire_responses: self.questionnaire_responses.clone(),
            claude_analysis: self
                .claude_analysis
                .as_ref()
                .and_then(|a| serde_json::to_value(a).ok()),
            generated_content: self
                .generated_content
                .as_ref()
                .and_then(|c| serde_json::to_value(c).ok()),
            plan_metadata: self
                .plan_metadata
                .as_ref()
                .and_then(|m| serde_json::to_value(m).ok()),
            status: self.status.as_str().to_string(),
            completion_percentage: self.completion_percentage,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
            completed_at: self.completed_at.map(Into::into),
        }
    }
}

/// Errors produced when normalizing a raw plan record.
///
/// Each variant names the offending field so callers can surface a precise
/// page-level failure instead of a partially typed render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("invalid timestamp in field '{field}': {message}")]
    InvalidTimestamp { field: &'static str, message: String },

    #[error("invalid JSON in required field '{field}': {message}")]
    InvalidJson { field: &'static str, message: String },

    #[error("unknown plan status '{value}'")]
    UnknownStatus { value: String },
}
