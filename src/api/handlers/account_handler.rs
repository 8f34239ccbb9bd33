//! Registration, login and logout.

use axum::{extract::State, response::Redirect, routing::post, Router};
use axum_extra::extract::cookie::CookieJar;

use crate::api::extractors::ValidatedForm;
use crate::api::middleware::{expired_session_cookie, session_cookie, Anonymous};
use crate::api::AppState;
use crate::config::{PATH_HOME, PATH_LOGIN};
use crate::errors::AppResult;
use crate::forms::{LoginForm, RegisterForm};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register/", post(register))
        .route("/login/", post(login))
        .route("/logout/", post(logout).get(logout))
}

/// Register a customer account
#[utoipa::path(
    post,
    path = "/register/",
    tag = "Accounts",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created, redirect to /login/"),
        (status = 400, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    _anonymous: Anonymous,
    ValidatedForm(registration): ValidatedForm<RegisterForm>,
) -> AppResult<Redirect> {
    state.auth().register(registration).await?;
    Ok(Redirect::to(PATH_LOGIN))
}

/// Sign in and receive the session cookie
#[utoipa::path(
    post,
    path = "/login/",
    tag = "Accounts",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, session cookie set, redirect to /"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Username or Password Incorrect!")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    _anonymous: Anonymous,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let token = state.auth().login(form.username, form.password).await?;
    let jar = jar.add(session_cookie(token.access_token, state.secure_cookies));

    Ok((jar, Redirect::to(PATH_HOME)))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/logout/",
    tag = "Accounts",
    responses((status = 303, description = "Signed out, redirect to /login/"))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(expired_session_cookie()), Redirect::to(PATH_LOGIN))
}
