//! Identity webhook event envelope.

use serde::{Deserialize, Serialize};

use super::model::ExternalIdentity;
use hireai_core::{AppError, AppResult};

/// The event types this system acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Created,
    Updated,
    Deleted,
    /// Anything else; acknowledged and ignored.
    Other,
}

/// `{ "type": ..., "data": {...} }` as delivered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Deserialize)]
struct DeletedObject {
    id: Option<String>,
}

impl WebhookEvent {
    pub fn kind(&self) -> EventKind {
        match self.event_type.as_str() {
            "user.created" => EventKind::Created,
            "user.updated" => EventKind::Updated,
            "user.deleted" => EventKind::Deleted,
            _ => EventKind::Other,
        }
    }

    /// Decode `data` as a full identity (created/updated events).
    pub fn identity(&self) -> AppResult<ExternalIdentity> {
        let identity: ExternalIdentity = serde_json::from_value(self.data.clone())?;
        if identity.id.is_empty() {
            return Err(AppError::validation("Event data has an empty user id"));
        }
        Ok(identity)
    }

    /// The external ID carried by `data` (deleted events only carry this).
    pub fn subject_id(&self) -> AppResult<String> {
        let object: DeletedObject = serde_json::from_value(self.data.clone())?;
        object
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::validation("Event data is missing the user id"))
    }
}
