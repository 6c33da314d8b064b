//! Role-specific profile entities.

pub mod model;

pub use model::{CandidateProfile, InterviewerProfile, RoleProfile};
