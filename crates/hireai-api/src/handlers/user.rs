//! User registration and self lookup.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use hireai_core::error::AppError;
use hireai_entity::user::UserView;

use crate::dto::request::UpsertUserRequest;
use crate::dto::response::UserProfileResponse;
use crate::error::ApiError;
use crate::extractors::GuardedUser;
use crate::state::AppState;

/// POST /api/users
///
/// Registration from the client's own sign-up flow. A caller may only
/// register the identity its bearer credential belongs to.
pub async fn upsert_user(
    State(state): State<AppState>,
    GuardedUser(guarded): GuardedUser,
    Json(req): Json<UpsertUserRequest>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let registration = req.into_registration()?;

    if registration.external_id != guarded.session.external_id {
        warn!(
            caller = %guarded.session.external_id,
            target = %registration.external_id,
            "Registration for another identity refused"
        );
        return Err(AppError::forbidden("Cannot register a different identity").into());
    }

    let (user, profile) = state.reconciler.register(registration).await?;

    Ok(Json(UserProfileResponse {
        user: UserView::from(user),
        profile,
    }))
}

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    GuardedUser(guarded): GuardedUser,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let profile = state.profiles.find_for(&guarded.user).await?;

    Ok(Json(UserProfileResponse {
        user: UserView::from(guarded.user),
        profile,
    }))
}
