//! Auth routes — sign-up, password sign-in, session management.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::json;
use time::Duration;

use crate::services::{auth as auth_svc, session};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("PUBLIC_BASE_URL")
        .map(|uri| uri.starts_with("https://"))
        .unwrap_or(false)
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .secure(secure)
        .build()
}

fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

/// Like `AuthUser`, but anonymous requests pass through as `None`.
/// Used where attribution is optional (feedback submissions).
pub struct MaybeAuthUser(pub Option<session::SessionUser>);

impl<S> axum::extract::FromRequestParts<S> for MaybeAuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Ok(Self(None));
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        Ok(Self(user))
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

pub(crate) fn auth_error_response(err: auth_svc::AuthError) -> Response {
    match err {
        auth_svc::AuthError::Validation(fields) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": fields }))).into_response()
        }
        auth_svc::AuthError::EmailTaken => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "email already registered" })),
        )
            .into_response(),
        auth_svc::AuthError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid credentials" })),
        )
            .into_response(),
        auth_svc::AuthError::Db(e) => {
            tracing::error!(error = %e, "auth database error");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `POST /api/auth/signup/job-seeker` — register a job seeker, then the
/// client moves on to sign-in.
pub async fn signup_job_seeker(
    State(state): State<AppState>,
    Json(form): Json<auth_svc::JobSeekerSignup>,
) -> Response {
    match auth_svc::signup_job_seeker(&state.pool, &form).await {
        Ok(user_id) => (
            StatusCode::CREATED,
            Json(json!({ "user_id": user_id, "redirect_to": "/signin" })),
        )
            .into_response(),
        Err(e) => auth_error_response(e),
    }
}

/// `POST /api/auth/signup/job-poster` — register an employer account.
pub async fn signup_job_poster(
    State(state): State<AppState>,
    Json(form): Json<auth_svc::JobPosterSignup>,
) -> Response {
    match auth_svc::signup_job_poster(&state.pool, &form).await {
        Ok(user_id) => (
            StatusCode::CREATED,
            Json(json!({ "user_id": user_id, "redirect_to": "/signin" })),
        )
            .into_response(),
        Err(e) => auth_error_response(e),
    }
}

/// `POST /api/auth/signin` — verify credentials, create a session, set
/// the cookie. The response carries the landing route: admins go to the
/// back office, everyone else to their profile.
pub async fn signin(State(state): State<AppState>, Json(form): Json<auth_svc::SigninForm>) -> Response {
    let outcome = match auth_svc::signin(&state.pool, &form).await {
        Ok(o) => o,
        Err(e) => return auth_error_response(e),
    };

    let token = match session::create_session(&state.pool, outcome.user_id).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let jar = CookieJar::new().add(session_cookie(token, cookie_secure()));
    (
        jar,
        Json(json!({
            "user_id": outcome.user_id,
            "is_admin": outcome.is_admin,
            "redirect_to": outcome.redirect_to,
        })),
    )
        .into_response()
}

/// `POST /api/auth/signout` — delete session, clear cookie.
pub async fn signout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let _ = session::delete_session(&state.pool, &auth.token).await;

    let jar = CookieJar::new().add(clear_session_cookie(cookie_secure()));
    (jar, StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me` — return current user with resolved role.
pub async fn me(auth: AuthUser) -> Json<session::SessionUser> {
    Json(auth.user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
