//! Question Catalog
//!
//! The fixed questionnaire: a business-context square (square 0) followed by
//! the nine marketing squares. Questions are static configuration ordered
//! into a single flat sequence; the flow controller treats them uniformly.

use crate::models::question::{AnswerValue, ConditionOperator, Question, QuestionKind};

/// Display title for a square
pub fn square_title(square: i32) -> &'static str {
    match square {
        0 => "Business Context",
        1 => "Target Market",
        2 => "Value Proposition",
        3 => "Media Channels",
        4 => "Lead Capture",
        5 => "Lead Nurturing",
        6 => "Sales Conversion",
        7 => "Customer Experience",
        8 => "Lifetime Value",
        9 => "Referral System",
        _ => "Unknown",
    }
}

/// The business-context questions (square 0).
///
/// Ids here are load-bearing: business-context extraction reads them by name.
pub fn business_context_questions() -> Vec<Question> {
    vec![
        Question::new("industry", 0, "What industry is your business in?", QuestionKind::Text)
            .with_placeholder("e.g. SaaS, Retail, Professional services"),
        Question::new(
            "business-model",
            0,
            "What best describes your business model?",
            QuestionKind::Radio,
        )
        .with_options(&["B2B", "B2C", "B2B2C", "Marketplace"]),
        Question::new(
            "company-size",
            0,
            "How many people work in your business?",
            QuestionKind::Text,
        )
        .with_help("A number or a range is fine"),
        Question::new(
            "years-in-operation",
            0,
            "How long has your business been operating?",
            QuestionKind::Select,
        )
        .with_options(&["Less than 1 year", "1-2 years", "3-5 years", "6-10 years", "10+ years"]),
        Question::new(
            "geographic-scope",
            0,
            "What is your geographic scope?",
            QuestionKind::Select,
        )
        .with_options(&["Local", "Regional", "National", "International"]),
        Question::new(
            "primary-challenges",
            0,
            "What are your biggest marketing challenges right now?",
            QuestionKind::Multiselect,
        )
        .with_options(&[
            "Lead generation",
            "Brand awareness",
            "Customer retention",
            "Converting leads to sales",
            "Standing out from competitors",
            "Limited budget",
            "Limited time",
        ]),
        Question::new(
            "marketing-maturity",
            0,
            "How would you rate your marketing experience?",
            QuestionKind::Radio,
        )
        .with_options(&["beginner", "intermediate", "advanced"]),
        Question::new(
            "marketing-budget",
            0,
            "What is your approximate monthly marketing budget?",
            QuestionKind::Text,
        )
        .optional(),
        Question::new(
            "time-availability",
            0,
            "How much time per week can you dedicate to marketing?",
            QuestionKind::Text,
        )
        .optional(),
        Question::new(
            "business-goals",
            0,
            "What are your main business goals for the next 12 months?",
            QuestionKind::Multiselect,
        )
        .with_options(&[
            "Grow revenue",
            "Enter new markets",
            "Launch new products",
            "Build a repeatable sales process",
            "Reduce customer churn",
            "Hire and scale the team",
        ]),
    ]
}

/// The main marketing questionnaire (squares 1-9).
pub fn marketing_questions() -> Vec<Question> {
    vec![
        // Square 1: Target Market
        Question::new(
            "target-demographics",
            1,
            "Describe your ideal customer: age, income, location.",
            QuestionKind::Textarea,
        ),
        Question::new(
            "target-pain-points",
            1,
            "What problems keep your ideal customer up at night?",
            QuestionKind::Textarea,
        )
        .with_help("List the pains your product or service relieves"),
        Question::new(
            "customer-sources",
            1,
            "Where do your current customers come from?",
            QuestionKind::Multiselect,
        )
        .with_options(&[
            "Word of mouth",
            "Search engines",
            "Social media",
            "Paid advertising",
            "Events",
            "Partnerships",
        ]),
        // Square 2: Value Proposition
        Question::new(
            "core-problem",
            2,
            "What is the single core problem you solve?",
            QuestionKind::Textarea,
        ),
        Question::new(
            "unique-advantages",
            2,
            "What makes your offer different from the alternatives?",
            QuestionKind::Textarea,
        ),
        Question::new(
            "proof-points",
            2,
            "What proof do you have that your offer works?",
            QuestionKind::Textarea,
        )
        .optional()
        .with_help("Testimonials, case studies, numbers"),
        // Square 3: Media Channels
        Question::new(
            "digital-channels",
            3,
            "Which digital channels do you use today?",
            QuestionKind::Multiselect,
        )
        .with_options(&[
            "SEO / content",
            "Email",
            "Social media",
            "Paid advertising",
            "Webinars",
            "None yet",
        ]),
        Question::new(
            "channel-effectiveness",
            3,
            "How effective is your current best channel? (1-10)",
            QuestionKind::Range,
        ),
        Question::new(
            "paid-ads-budget",
            3,
            "What is your monthly paid advertising budget?",
            QuestionKind::Text,
        )
        .optional()
        .with_conditional(
            "digital-channels",
            ConditionOperator::Includes,
            AnswerValue::Text("Paid advertising".into()),
        ),
        // Square 4: Lead Capture
        Question::new(
            "lead-capture-methods",
            4,
            "How do you currently capture leads?",
            QuestionKind::Multiselect,
        )
        .with_options(&[
            "Website forms",
            "Lead magnets",
            "Phone enquiries",
            "Social DMs",
            "Events",
            "We don't capture leads",
        ]),
        Question::new(
            "lead-magnets",
            4,
            "What do you offer in exchange for contact details?",
            QuestionKind::Textarea,
        )
        .optional(),
        // Square 5: Lead Nurturing
        Question::new(
            "follow-up-process",
            5,
            "What happens after someone becomes a lead?",
            QuestionKind::Textarea,
        ),
        Question::new(
            "email-frequency",
            5,
            "How often do you contact your list?",
            QuestionKind::Select,
        )
        .with_options(&["Daily", "Weekly", "Monthly", "Rarely", "Never"]),
        // Square 6: Sales Conversion
        Question::new(
            "sales-process",
            6,
            "Describe your sales process from enquiry to close.",
            QuestionKind::Textarea,
        ),
        Question::new(
            "common-objections",
            6,
            "What objections do you hear most often?",
            QuestionKind::Textarea,
        ),
        Question::new(
            "sales-cycle-length",
            6,
            "How long is your typical sales cycle?",
            QuestionKind::Select,
        )
        .with_options(&["Same day", "Under a week", "1-4 weeks", "1-3 months", "Over 3 months"]),
        // Square 7: Customer Experience
        Question::new(
            "delivery-method",
            7,
            "How do you deliver your product or service?",
            QuestionKind::Textarea,
        ),
        Question::new(
            "feedback-collection",
            7,
            "How do you collect customer feedback?",
            QuestionKind::Multiselect,
        )
        .with_options(&["Surveys", "Reviews", "Interviews", "Support tickets", "We don't"]),
        // Square 8: Lifetime Value
        Question::new(
            "retention-strategies",
            8,
            "How do you keep customers coming back?",
            QuestionKind::Textarea,
        ),
        Question::new(
            "upsell-opportunities",
            8,
            "What could you offer existing customers next?",
            QuestionKind::Textarea,
        )
        .optional(),
        Question::new(
            "has-subscription",
            8,
            "Do you have a recurring revenue model?",
            QuestionKind::Checkbox,
        )
        .with_options(&["Yes"]),
        // Square 9: Referral System
        Question::new(
            "referral-sources",
            9,
            "What share of new business comes from referrals?",
            QuestionKind::Select,
        )
        .with_options(&["None", "Under 10%", "10-25%", "25-50%", "Over 50%"]),
        Question::new(
            "referral-incentives",
            9,
            "Do you reward customers for referrals, and how?",
            QuestionKind::Textarea,
        )
        .optional(),
    ]
}

/// The full ordered sequence: business context first, then the nine squares.
pub fn all_questions() -> Vec<Question> {
    let mut questions = business_context_questions();
    questions.extend(marketing_questions());
    questions
}
