//! Plan Document Rendering
//!
//! Renders a completed plan as a markdown document for export. Rendering
//! requires generated content; plans that never finished generation are
//! rejected rather than rendered half-empty.

use crate::models::plan::Plan;
use crate::utils::error::{AppError, AppResult};

/// Render a plan as a markdown document
pub fn render_plan_markdown(plan: &Plan) -> AppResult<String> {
    let content = plan
        .generated_content
        .as_ref()
        .ok_or_else(|| AppError::validation("Plan has no generated content to render"))?;

    let mut doc = String::new();
    let industry = plan.business_context.industry.as_deref().unwrap_or("Your Business");

    doc.push_str(&format!("# 1-Page Marketing Plan: {}\n\n", industry));
    doc.push_str(&format!(
        "*Generated {}*\n\n",
        plan.created_at.format("%Y-%m-%d")
    ));

    let grid = &content.one_page_plan;

    doc.push_str("## BEFORE (Prospects)\n\n");
    doc.push_str(&format!("**Target Market:** {}\n\n", grid.before.target_market));
    doc.push_str(&format!("**Message:** {}\n\n", grid.before.message));
    if !grid.before.media.is_empty() {
        doc.push_str(&format!("**Media:** {}\n\n", grid.before.media.join(", ")));
    }

    doc.push_str("## DURING (Leads)\n\n");
    doc.push_str(&format!("**Lead Capture:** {}\n\n", grid.during.lead_capture));
    doc.push_str(&format!("**Lead Nurture:** {}\n\n", grid.during.lead_nurture));
    doc.push_str(&format!(
        "**Sales Conversion:** {}\n\n",
        grid.during.sales_conversion
    ));

    doc.push_str("## AFTER (Customers)\n\n");
    doc.push_str(&format!(
        "**Deliver a World-Class Experience:** {}\n\n",
        grid.after.deliver_experience
    ));
    doc.push_str(&format!(
        "**Increase Lifetime Value:** {}\n\n",
        grid.after.lifetime_value
    ));
    doc.push_str(&format!(
        "**Orchestrate Referrals:** {}\n\n",
        grid.after.referrals
    ));

    let guide = &content.implementation_guide;
    doc.push_str("## Implementation Guide\n\n");
    doc.push_str(&format!("{}\n\n", guide.executive_summary));
    doc.push_str(&format!("### Phase 1\n\n{}\n\n", guide.action_plans.phase1));
    doc.push_str(&format!("### Phase 2\n\n{}\n\n", guide.action_plans.phase2));
    doc.push_str(&format!("### Phase 3\n\n{}\n\n", guide.action_plans.phase3));
    if !guide.kpis.is_empty() {
        doc.push_str(&format!("**KPIs:** {}\n\n", guide.kpis));
    }

    let insights = &content.strategic_insights;
    doc.push_str("## Strategic Insights\n\n");
    if !insights.strengths.is_empty() {
        doc.push_str("### Strengths\n\n");
        for item in &insights.strengths {
            doc.push_str(&format!("- {}\n", item));
        }
        doc.push('\n');
    }
    if !insights.opportunities.is_empty() {
        doc.push_str("### Opportunities\n\n");
        for item in &insights.opportunities {
            doc.push_str(&format!("- {}\n", item));
        }
        doc.push('\n');
    }
    if !insights.positioning.is_empty() {
        doc.push_str(&format!("**Positioning:** {}\n\n", insights.positioning));
    }
    if !insights.risks.is_empty() {
        doc.push_str("### Risks\n\n");
        for item in &insights.risks {
            doc.push_str(&format!("- {}\n", item));
        }
        doc.push('\n');
    }

    Ok(doc)
}

/// Suggested filename for an exported plan document
pub fn document_filename(plan: &Plan) -> String {
    format!(
        "marketing-plan-{}.md",
        plan.created_at.format("%Y-%m-%d")
    )
}
