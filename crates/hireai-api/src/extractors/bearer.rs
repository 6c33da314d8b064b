//! Bearer credential extractor backed by the session guard.

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use hireai_auth::GuardedIdentity;

use crate::error::ApiError;
use crate::state::AppState;

/// A request whose external bearer credential verified, with its local user.
///
/// Resolving this extractor may create the local user when the identity
/// provider's webhook has not been delivered yet.
#[derive(Debug, Clone)]
pub struct GuardedUser(pub GuardedIdentity);

impl FromRequestParts<AppState> for GuardedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Missing or malformed headers fall through to the guard's rejection.
        let header = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .ok();
        let bearer = header.as_ref().map(|TypedHeader(auth)| auth.token());

        let identity = state.session_guard.resolve(bearer).await?;
        Ok(Self(identity))
    }
}
