//! Offline Plan Generator
//!
//! Deterministic [`PlanGenerator`] used when no API key is configured and
//! in tests. Output is templated from the business context, so the pipeline
//! can run end to end without a network.

use async_trait::async_trait;

use super::PlanGenerator;
use crate::models::context::BusinessContext;
use crate::models::plan::{
    ActionPlans, BusinessModelAssessment, ClaudeAnalysis, GeneratedContent, GrowthPotential,
    ImplementationGuide, MarketOpportunity, OnePagePlan, PlanAfter, PlanBefore, PlanDuring,
    StrategicInsights,
};
use crate::utils::error::AppResult;

/// Offline generator producing templated plans
#[derive(Debug, Default)]
pub struct StaticGenerator;

impl StaticGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn industry_label(context: &BusinessContext) -> &str {
    context.industry.as_deref().unwrap_or("your industry")
}

#[async_trait]
impl PlanGenerator for StaticGenerator {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn analyze(
        &self,
        context: &BusinessContext,
        _responses: &serde_json::Value,
    ) -> AppResult<ClaudeAnalysis> {
        let industry = industry_label(context);

        Ok(ClaudeAnalysis {
            business_model_assessment: BusinessModelAssessment {
                strengths: vec![format!("Established presence in {}", industry)],
                weaknesses: context.primary_challenges.clone(),
                opportunities: vec!["Systematize marketing with a repeatable plan".to_string()],
                threats: vec!["Competitors with a more consistent marketing cadence".to_string()],
            },
            market_opportunity: MarketOpportunity {
                size: format!("Addressable demand within {}", industry),
                growth: "Steady".to_string(),
                ..Default::default()
            },
            strategic_recommendations: vec![
                "Define one primary customer avatar before spending on media".to_string(),
                "Capture every lead into a single follow-up system".to_string(),
                "Build a referral ask into the delivery process".to_string(),
            ],
            growth_potential: GrowthPotential {
                short_term: "Improve lead capture and follow-up".to_string(),
                long_term: "Compound referrals and lifetime value".to_string(),
                scalability: "High once the funnel is documented".to_string(),
                investment_needed: context
                    .marketing_budget
                    .clone()
                    .unwrap_or_else(|| "Time more than money initially".to_string()),
            },
            ..Default::default()
        })
    }

    async fn generate(
        &self,
        context: &BusinessContext,
        analysis: &ClaudeAnalysis,
    ) -> AppResult<GeneratedContent> {
        let industry = industry_label(context);

        Ok(GeneratedContent {
            one_page_plan: OnePagePlan {
                before: PlanBefore {
                    target_market: format!("Decision makers in {}", industry),
                    message: "A clear promise that addresses their number one pain".to_string(),
                    media: vec!["Email".to_string(), "Search".to_string()],
                },
                during: PlanDuring {
                    lead_capture: "Offer a valuable lead magnet on every channel".to_string(),
                    lead_nurture: "Weekly value-first email sequence".to_string(),
                    sales_conversion: "Low-friction consult with a concrete next step".to_string(),
                },
                after: PlanAfter {
                    deliver_experience: "Document and systematize onboarding".to_string(),
                    lifetime_value: "Scheduled check-ins and an upgrade path".to_string(),
                    referrals: "Ask at the moment of delivered value".to_string(),
                },
            },
            implementation_guide: ImplementationGuide {
                executive_summary: format!(
                    "A 90-day plan to build a repeatable marketing system for a {} business.",
                    industry
                ),
                action_plans: ActionPlans {
                    phase1: "Weeks 1-4: define the avatar and craft the core message".to_string(),
                    phase2: "Weeks 5-8: launch lead capture and the nurture sequence".to_string(),
                    phase3: "Weeks 9-12: tighten conversion and install the referral ask"
                        .to_string(),
                },
                timeline: "90 days".to_string(),
                kpis: "Leads captured, nurture open rate, conversion rate, referral count"
                    .to_string(),
                ..Default::default()
            },
            strategic_insights: StrategicInsights {
                strengths: analysis.business_model_assessment.strengths.clone(),
                opportunities: analysis.business_model_assessment.opportunities.clone(),
                positioning: format!("The systematized choice in {}", industry),
                growth_potential: analysis.growth_potential.short_term.clone(),
                risks: analysis.risk_factors.clone(),
                ..Default::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_generator_is_deterministic() {
        let generator = StaticGenerator::new();
        let context = BusinessContext {
            industry: Some("Fitness".to_string()),
            ..Default::default()
        };
        let responses = serde_json::json!({});

        let first = generator.analyze(&context, &responses).await.unwrap();
        let second = generator.analyze(&context, &responses).await.unwrap();
        assert_eq!(first, second);
        assert!(first.business_model_assessment.strengths[0].contains("Fitness"));
    }

    #[tokio::test]
    async fn test_generate_threads_analysis_through() {
        let generator = StaticGenerator::new();
        let context = BusinessContext::default();

        let analysis = generator
            .analyze(&context, &serde_json::json!({}))
            .await
            .unwrap();
        let content = generator.generate(&context, &analysis).await.unwrap();

        assert_eq!(
            content.strategic_insights.strengths,
            analysis.business_model_assessment.strengths
        );
        assert!(!content.one_page_plan.before.target_market.is_empty());
        assert!(!content.implementation_guide.action_plans.phase1.is_empty());
    }
}
