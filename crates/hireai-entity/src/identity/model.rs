//! External identity as reported by the identity provider.

use serde::{Deserialize, Serialize};

use super::precedence::{RoleSources, first_present};
use crate::user::UserRole;

/// Freeform metadata bag.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Metadata key carrying the account role.
pub const ROLE_KEY: &str = "role";
/// Older clients wrote the role under this key.
pub const LEGACY_ROLE_KEY: &str = "user_type";
/// Metadata key carrying an interviewer's company.
pub const COMPANY_KEY: &str = "company_name";

/// Verification state of an email address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    #[serde(default)]
    pub status: Option<String>,
}

/// One email address attached to an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Provider-assigned address ID.
    #[serde(default)]
    pub id: Option<String>,
    pub email_address: String,
    #[serde(default)]
    pub verification: Option<Verification>,
}

impl EmailAddress {
    pub fn is_verified(&self) -> bool {
        self.verification
            .as_ref()
            .and_then(|v| v.status.as_deref())
            == Some("verified")
    }
}

/// An identity owned by the external provider. Read-only to HireAI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// Stable external identifier.
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    pub primary_email_address_id: Option<String>,
    /// Tier only privileged services can write.
    #[serde(default)]
    pub public_metadata: Metadata,
    /// Tier the identity's holder can write.
    #[serde(default)]
    pub unsafe_metadata: Metadata,
}

impl ExternalIdentity {
    /// Pick the email address to mirror locally.
    ///
    /// Priority: the declared primary, then the first verified address, then
    /// the first address present.
    pub fn primary_email(&self) -> Option<&str> {
        let declared = self.primary_email_address_id.as_deref().and_then(|pid| {
            self.email_addresses
                .iter()
                .find(|e| e.id.as_deref() == Some(pid))
        });
        first_present([
            declared,
            self.email_addresses.iter().find(|e| e.is_verified()),
            self.email_addresses.first(),
        ])
        .map(|e| e.email_address.as_str())
    }

    /// Username from the provider, else the email local part, else the external ID.
    pub fn derived_username(&self) -> String {
        self.declared_username()
            .map(str::to_string)
            .unwrap_or_else(|| self.id.clone())
    }

    /// Username from the provider or the email local part, if either exists.
    pub fn declared_username(&self) -> Option<&str> {
        first_present([
            self.username.as_deref().filter(|u| !u.trim().is_empty()),
            self.primary_email()
                .and_then(|e| e.split('@').next())
                .filter(|local| !local.is_empty()),
        ])
    }

    /// Role sources as declared by the two metadata tiers.
    pub fn role_sources(&self) -> RoleSources {
        RoleSources {
            high_trust: role_in(&self.public_metadata),
            low_trust: role_in(&self.unsafe_metadata),
            backend: None,
        }
    }

    /// Role declared in metadata, high-trust tier first.
    pub fn declared_role(&self) -> Option<UserRole> {
        self.role_sources().declared()
    }

    /// Company declared in metadata, high-trust tier first.
    pub fn declared_company_name(&self) -> Option<&str> {
        first_present([
            company_in(&self.public_metadata),
            company_in(&self.unsafe_metadata),
        ])
    }
}

fn role_in(metadata: &Metadata) -> Option<UserRole> {
    first_present([
        metadata.get(ROLE_KEY).and_then(UserRole::from_metadata),
        metadata.get(LEGACY_ROLE_KEY).and_then(UserRole::from_metadata),
    ])
}

fn company_in(metadata: &Metadata) -> Option<&str> {
    metadata
        .get(COMPANY_KEY)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
