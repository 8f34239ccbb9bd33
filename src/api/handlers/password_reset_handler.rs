//! Password reset by emailed link.

use axum::{
    extract::{Path, State},
    response::{Json, Redirect},
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedForm;
use crate::api::AppState;
use crate::config::{PATH_PASSWORD_RESET_COMPLETE, PATH_PASSWORD_RESET_DONE};
use crate::errors::{AppError, AppResult};
use crate::forms::{PasswordResetForm, SetPasswordForm};
use crate::types::{MessageResponse, ResetLinkContext};

pub fn password_reset_routes() -> Router<AppState> {
    Router::new()
        .route("/password_reset/", post(request_reset))
        .route("/password_reset/done/", get(reset_done))
        .route(
            "/password_reset_confirm/:uid/:token/",
            get(check_reset_link).post(confirm_reset),
        )
        .route("/password-reset-complete/", get(reset_complete))
}

fn parse_uid(uid: &str) -> AppResult<Uuid> {
    Uuid::parse_str(uid).map_err(|_| AppError::InvalidResetLink)
}

/// Request a reset link. Always lands on the done page.
#[utoipa::path(
    post,
    path = "/password_reset/",
    tag = "Password reset",
    request_body(content = PasswordResetForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /password_reset/done/"),
        (status = 400, description = "Validation error")
    )
)]
pub async fn request_reset(
    State(state): State<AppState>,
    ValidatedForm(email): ValidatedForm<PasswordResetForm>,
) -> AppResult<Redirect> {
    state.auth().request_password_reset(email).await?;
    Ok(Redirect::to(PATH_PASSWORD_RESET_DONE))
}

#[utoipa::path(
    get,
    path = "/password_reset/done/",
    tag = "Password reset",
    responses((status = 200, body = MessageResponse))
)]
pub async fn reset_done() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "We've emailed you instructions for setting your password, if an account exists with the email you entered.",
    ))
}

/// Whether a reset link is still usable
#[utoipa::path(
    get,
    path = "/password_reset_confirm/{uid}/{token}/",
    tag = "Password reset",
    params(
        ("uid" = String, Path, description = "Account id"),
        ("token" = String, Path, description = "Reset token")
    ),
    responses((status = 200, body = ResetLinkContext))
)]
pub async fn check_reset_link(
    State(state): State<AppState>,
    Path((uid, token)): Path<(String, String)>,
) -> AppResult<Json<ResetLinkContext>> {
    let validlink = match parse_uid(&uid) {
        Ok(uid) => match state.auth().check_reset_link(uid, token).await {
            Ok(_) => true,
            Err(AppError::InvalidResetLink) => false,
            Err(e) => return Err(e),
        },
        Err(_) => false,
    };
    Ok(Json(ResetLinkContext { validlink }))
}

/// Set a new password through a reset link
#[utoipa::path(
    post,
    path = "/password_reset_confirm/{uid}/{token}/",
    tag = "Password reset",
    params(
        ("uid" = String, Path, description = "Account id"),
        ("token" = String, Path, description = "Reset token")
    ),
    request_body(content = SetPasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Password changed, redirect to /password-reset-complete/"),
        (status = 400, description = "Invalid link or validation error")
    )
)]
pub async fn confirm_reset(
    State(state): State<AppState>,
    Path((uid, token)): Path<(String, String)>,
    ValidatedForm(new_password): ValidatedForm<SetPasswordForm>,
) -> AppResult<Redirect> {
    let uid = parse_uid(&uid)?;
    state
        .auth()
        .confirm_password_reset(uid, token, new_password)
        .await?;
    Ok(Redirect::to(PATH_PASSWORD_RESET_COMPLETE))
}

#[utoipa::path(
    get,
    path = "/password-reset-complete/",
    tag = "Password reset",
    responses((status = 200, body = MessageResponse))
)]
pub async fn reset_complete() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Your password has been set. You may go ahead and log in now.",
    ))
}
