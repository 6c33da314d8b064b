//! First-party session cookie extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use hireai_core::error::AppError;
use hireai_entity::user::LocalUser;

use crate::error::ApiError;
use crate::state::AppState;

/// The local user named by a valid session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser(pub LocalUser);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(state.session_issuer.cookie_name())
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::unauthorized("Not authenticated"))?;

        let claims = state.session_issuer.verify(&token)?;

        let user = state
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Session user no longer exists"))?;

        Ok(Self(user))
    }
}
