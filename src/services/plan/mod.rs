//! Plan Services
//!
//! Record normalization, the submission seam, and the service that drives
//! a submitted questionnaire through the generation pipeline.

pub mod normalize;
pub mod service;
pub mod submitter;

pub use normalize::normalize;
pub use service::PlanService;
pub use submitter::PlanSubmitter;
