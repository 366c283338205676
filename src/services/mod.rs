//! Service layer: questionnaire flow, plan generation, and export

pub mod document;
pub mod generator;
pub mod plan;
pub mod questionnaire;
