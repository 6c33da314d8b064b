//! Request bodies.

use serde::Deserialize;
use validator::Validate;

use hireai_auth::Registration;
use hireai_core::error::AppError;
use hireai_entity::user::UserRole;

/// POST /api/users
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertUserRequest {
    #[validate(length(min = 1, message = "external_id is required"))]
    pub external_id: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "name is too long"))]
    pub name: Option<String>,
    pub role: Option<String>,
    #[validate(length(max = 255, message = "company_name is too long"))]
    pub company_name: Option<String>,
}

impl UpsertUserRequest {
    /// Validate and convert into a [`Registration`].
    pub fn into_registration(self) -> Result<Registration, AppError> {
        self.validate()
            .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;

        let role = self
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::parse::<UserRole>)
            .transpose()?;

        Ok(Registration {
            external_id: self.external_id,
            email: self.email,
            name: self.name,
            role,
            company_name: self.company_name,
        })
    }
}
