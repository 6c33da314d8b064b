//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two account types a HireAI user can have.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Applies to jobs and uploads a resume.
    #[default]
    Candidate,
    /// Posts jobs and reviews candidates, usually on behalf of a company.
    Interviewer,
}

impl UserRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Interviewer => "interviewer",
        }
    }

    /// Parse a metadata value, treating anything unrecognized as absent.
    ///
    /// Identity metadata is partly user-writable, so a garbage value must not
    /// fail reconciliation; it simply does not count as a declared role.
    pub fn from_metadata(value: &serde_json::Value) -> Option<Self> {
        value.as_str().and_then(|s| s.trim().parse().ok())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = hireai_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "candidate" => Ok(Self::Candidate),
            "interviewer" => Ok(Self::Interviewer),
            _ => Err(hireai_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: candidate, interviewer"
            ))),
        }
    }
}
