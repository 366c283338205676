//! Plan Record Normalization
//!
//! Converts a [`RawPlanRecord`] — whose temporal and JSON-capable fields may
//! arrive either as serialized text or already-structured values — into the
//! canonical [`Plan`]. Pure function: same input always yields the same
//! output or the same error.
//!
//! Failure policy:
//! - required JSON fields (business context, questionnaire responses) and
//!   all temporal fields fail the whole normalization on parse error
//! - optional JSON fields (analysis, generated content, metadata) degrade
//!   to absent, with a warning logged
//! - an unrecognized status is an error, never a silent default

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::models::plan::{
    ClaudeAnalysis, GeneratedContent, NormalizeError, Plan, PlanMetadata, PlanStatus,
    RawPlanRecord, RawTemporal,
};

/// Normalize a raw plan record into its canonical form.
pub fn normalize(raw: RawPlanRecord) -> Result<Plan, NormalizeError> {
    let status = PlanStatus::parse(&raw.status).ok_or_else(|| NormalizeError::UnknownStatus {
        value: raw.status.clone(),
    })?;

    let created_at = temporal("created_at", raw.created_at)?;
    let updated_at = temporal("updated_at", raw.updated_at)?;
    let completed_at = raw
        .completed_at
        .map(|t| temporal("completed_at", t))
        .transpose()?;

    let business_context = required("business_context", raw.business_context)?;
    let questionnaire_responses = structured("questionnaire_responses", raw.questionnaire_responses)?;

    let claude_analysis: Option<ClaudeAnalysis> = optional("claude_analysis", raw.claude_analysis);
    let generated_content: Option<GeneratedContent> =
        optional("generated_content", raw.generated_content);
    let plan_metadata: Option<PlanMetadata> = optional("plan_metadata", raw.plan_metadata);

    Ok(Plan {
        id: raw.id,
        user_id: raw.user_id,
        business_context,
        questionnaire_responses,
        claude_analysis,
        generated_content,
        plan_metadata,
        status,
        completion_percentage: raw.completion_percentage,
        created_at,
        updated_at,
        completed_at,
    })
}

/// Resolve a temporal field: pass through parsed values, parse RFC 3339 text.
fn temporal(field: &'static str, value: RawTemporal) -> Result<DateTime<Utc>, NormalizeError> {
    match value {
        RawTemporal::Parsed(dt) => Ok(dt),
        RawTemporal::Text(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| NormalizeError::InvalidTimestamp {
                field,
                message: e.to_string(),
            }),
    }
}

/// Resolve a JSON-capable value to structured form: a string is parsed as
/// JSON, anything else passes through untouched.
fn structured(
    field: &'static str,
    value: serde_json::Value,
) -> Result<serde_json::Value, NormalizeError> {
    match value {
        serde_json::Value::String(text) => {
            serde_json::from_str(&text).map_err(|e| NormalizeError::InvalidJson {
                field,
                message: e.to_string(),
            })
        }
        other => Ok(other),
    }
}

/// Resolve and deserialize a required JSON-capable field.
fn required<T: DeserializeOwned>(
    field: &'static str,
    value: serde_json::Value,
) -> Result<T, NormalizeError> {
    let value = structured(field, value)?;
    serde_json::from_value(value).map_err(|e| NormalizeError::InvalidJson {
        field,
        message: e.to_string(),
    })
}

/// Resolve and deserialize an optional JSON-capable field; any failure
/// degrades to absence.
fn optional<T: DeserializeOwned>(
    field: &'static str,
    value: Option<serde_json::Value>,
) -> Option<T> {
    let value = value?;
    match structured(field, value).and_then(|v| {
        serde_json::from_value(v).map_err(|e| NormalizeError::InvalidJson {
            field,
            message: e.to_string(),
        })
    }) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("dropping unparseable optional field: {}", e);
            None
        }
    }
}
