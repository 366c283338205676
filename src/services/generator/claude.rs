//! Claude Plan Generator
//!
//! [`PlanGenerator`] backed by Anthropic's Claude API. Both phases are a
//! single non-streaming message call: build a prompt, post it, pull the
//! text block out of the response, and deserialize the JSON it carries.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::PlanGenerator;
use crate::models::context::BusinessContext;
use crate::models::plan::{ClaudeAnalysis, GeneratedContent};
use crate::models::settings::AppConfig;
use crate::utils::error::{AppError, AppResult};

/// Current API version
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude-backed plan generator
pub struct ClaudeGenerator {
    api_base_url: String,
    model: String,
    max_tokens: u32,
    api_key: String,
    client: reqwest::Client,
}

impl ClaudeGenerator {
    /// Create a generator from app configuration.
    ///
    /// Fails when no API key is configured; callers should fall back to an
    /// offline generator in that case.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config("No API key configured"))?;

        Ok(Self {
            api_base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_key,
            client: reqwest::Client::new(),
        })
    }

    /// Send a single-message completion request and return the text block
    async fn complete(&self, system: &str, prompt: &str) -> AppResult<String> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": system,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .client
            .post(&self.api_base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::generation(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| AppError::generation(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::generation(format!(
                "API returned {}: {}",
                status, body_text
            )));
        }

        let parsed: ApiResponse = serde_json::from_str(&body_text)
            .map_err(|e| AppError::generation(format!("Unexpected response shape: {}", e)))?;

        parsed
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| AppError::generation("Response contained no text block"))
    }

    fn analysis_prompt(context: &BusinessContext, responses: &serde_json::Value) -> String {
        format!(
            "Analyze this business based on its questionnaire responses.\n\n\
             Business context:\n{}\n\nQuestionnaire responses:\n{}\n\n\
             Respond with a single JSON object with these camelCase keys: \
             businessModelAssessment (strengths, weaknesses, opportunities, threats), \
             marketOpportunity (size, growth, trends, barriers), \
             competitivePositioning (competitors, advantages, differentiators), \
             customerAvatarRefinement (primaryAvatar with demographics, psychographics, painPoints), \
             strategicRecommendations, riskFactors, \
             growthPotential (shortTerm, longTerm, scalability, investmentNeeded).",
            serde_json::to_string_pretty(context).unwrap_or_default(),
            serde_json::to_string_pretty(responses).unwrap_or_default(),
        )
    }

    fn content_prompt(context: &BusinessContext, analysis: &ClaudeAnalysis) -> String {
        format!(
            "Create a 1-Page Marketing Plan from this business analysis.\n\n\
             Business context:\n{}\n\nAnalysis:\n{}\n\n\
             Respond with a single JSON object with these camelCase keys: \
             onePagePlan (before: targetMarket, message, media; \
             during: leadCapture, leadNurture, salesConversion; \
             after: deliverExperience, lifetimeValue, referrals), \
             implementationGuide (executiveSummary, actionPlans with phase1-phase3, \
             timeline, resources, kpis, templates), \
             strategicInsights (strengths, opportunities, positioning, \
             competitiveAdvantage, growthPotential, risks, investments, roi).",
            serde_json::to_string_pretty(context).unwrap_or_default(),
            serde_json::to_string_pretty(analysis).unwrap_or_default(),
        )
    }
}

#[async_trait]
impl PlanGenerator for ClaudeGenerator {
    fn name(&self) -> &'static str {
        "claude"
    }

    async fn analyze(
        &self,
        context: &BusinessContext,
        responses: &serde_json::Value,
    ) -> AppResult<ClaudeAnalysis> {
        debug!("requesting business analysis from {}", self.model);

        let text = self
            .complete(
                "You are an expert marketing strategist. Respond only with JSON.",
                &Self::analysis_prompt(context, responses),
            )
            .await?;

        serde_json::from_str(strip_json_fences(&text))
            .map_err(|e| AppError::generation(format!("Unparseable analysis payload: {}", e)))
    }

    async fn generate(
        &self,
        context: &BusinessContext,
        analysis: &ClaudeAnalysis,
    ) -> AppResult<GeneratedContent> {
        debug!("requesting plan content from {}", self.model);

        let text = self
            .complete(
                "You are an expert marketing strategist. Respond only with JSON.",
                &Self::content_prompt(context, analysis),
            )
            .await?;

        serde_json::from_str(strip_json_fences(&text))
            .map_err(|e| AppError::generation(format!("Unparseable content payload: {}", e)))
    }
}

/// Claude API response format
#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ApiContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ApiContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Strip a surrounding markdown code fence, if present.
///
/// Models sometimes wrap JSON payloads in ```json fences despite the
/// instructions; the payload inside is still what we asked for.
fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    else {
        return trimmed;
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences() {
        assert_eq!(strip_json_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_json_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = AppConfig::default();
        assert!(ClaudeGenerator::from_config(&config).is_err());

        let config = AppConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let generator = ClaudeGenerator::from_config(&config).unwrap();
        assert_eq!(generator.name(), "claude");
    }

    #[test]
    fn test_api_response_parses_mixed_blocks() {
        let json = r#"{"content":[{"type":"thinking"},{"type":"text","text":"{}"}]}"#;
        let parsed: ApiResponse = serde_json::from_str(json).unwrap();
        let text = parsed.content.into_iter().find_map(|b| b.text);
        assert_eq!(text.as_deref(), Some("{}"));
    }

    #[test]
    fn test_prompts_carry_the_inputs() {
        let context = BusinessContext {
            industry: Some("SaaS".to_string()),
            ..Default::default()
        };
        let prompt =
            ClaudeGenerator::analysis_prompt(&context, &serde_json::json!({"industry": "SaaS"}));
        assert!(prompt.contains("SaaS"));
        assert!(prompt.contains("businessModelAssessment"));
    }
}
