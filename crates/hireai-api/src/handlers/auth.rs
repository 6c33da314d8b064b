//! Session endpoints: login, logout, me.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use hireai_auth::LoginOutcome;
use hireai_entity::user::UserView;

use crate::dto::response::{LoginResponse, LogoutResponse, MeResponse};
use crate::error::ApiError;
use crate::extractors::{GuardedUser, SessionUser};
use crate::state::AppState;

/// POST /api/auth/login
///
/// Exchanges a verified external bearer credential for the first-party
/// session cookie. Repeats inside the cooldown window return `cached: true`
/// without a new cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    GuardedUser(guarded): GuardedUser,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let user = UserView::from(&guarded.user);

    match state.session_issuer.login(&guarded.user)? {
        LoginOutcome::Minted(cookie) => Ok((
            jar.add(cookie),
            Json(LoginResponse {
                message: "Login successful".to_string(),
                user,
                cached: None,
            }),
        )),
        LoginOutcome::Cached => Ok((
            jar,
            Json(LoginResponse {
                message: "Login successful (cached)".to_string(),
                user,
                cached: Some(true),
            }),
        )),
    }
}

/// POST /api/auth/logout
///
/// Always succeeds and always emits the removal cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    (
        jar.add(state.session_issuer.logout_cookie()),
        Json(LogoutResponse {
            message: "Logout successful".to_string(),
            logout_time: Utc::now(),
        }),
    )
}

/// GET /api/auth/me
pub async fn me(SessionUser(user): SessionUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: UserView::from(user),
    })
}
