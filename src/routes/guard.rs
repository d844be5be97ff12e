//! Route guard — gate pages and API calls on session and role.
//!
//! DESIGN
//! ======
//! The decision itself is a pure function over the resolved session, so
//! the redirect rules are testable without HTTP plumbing. Gated pages
//! turn a denial into a redirect (`/signin` when unauthenticated,
//! `/profile` otherwise); API extractors turn the same denial into
//! 401/403. There is no retry or queueing: the gate is a plain
//! conditional.

use axum::extract::FromRef;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::routes::auth::COOKIE_NAME;
use crate::services::role::Role;
use crate::services::session::{self, SessionUser};
use crate::state::AppState;

/// What a gated route demands of the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    SignedIn,
    Role(Role),
    Admin,
}

/// Outcome of the guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectSignIn,
    RedirectProfile,
}

/// Pure gate: unauthenticated visitors go to sign-in, authenticated ones
/// that miss the role/admin requirement go to their profile.
#[must_use]
pub fn decide(user: Option<&SessionUser>, requirement: Requirement) -> Decision {
    let Some(user) = user else {
        return Decision::RedirectSignIn;
    };

    match requirement {
        Requirement::SignedIn => Decision::Allow,
        Requirement::Admin => {
            if user.is_admin {
                Decision::Allow
            } else {
                Decision::RedirectProfile
            }
        }
        Requirement::Role(required) => {
            if user.role == required {
                Decision::Allow
            } else {
                Decision::RedirectProfile
            }
        }
    }
}

/// Translate a denial into the redirect the page routes use.
#[must_use]
pub fn redirect_for(decision: Decision) -> Option<Redirect> {
    match decision {
        Decision::Allow => None,
        Decision::RedirectSignIn => Some(Redirect::temporary("/signin")),
        Decision::RedirectProfile => Some(Redirect::temporary("/profile")),
    }
}

async fn resolve_visitor<S>(parts: &mut axum::http::request::Parts, state: &S) -> Result<Option<SessionUser>, StatusCode>
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
    if token.is_empty() {
        return Ok(None);
    }

    let app_state = AppState::from_ref(state);
    session::validate_session(&app_state.pool, token)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

// =============================================================================
// API EXTRACTORS
// =============================================================================

/// Handler parameter requiring the job-poster role; rejects with 401/403.
pub struct RequireJobPoster(pub SessionUser);

impl<S> axum::extract::FromRequestParts<S> for RequireJobPoster
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = resolve_visitor(parts, state).await?;
        match decide(user.as_ref(), Requirement::Role(Role::JobPoster)) {
            Decision::Allow => Ok(Self(user.ok_or(StatusCode::UNAUTHORIZED)?)),
            Decision::RedirectSignIn => Err(StatusCode::UNAUTHORIZED),
            Decision::RedirectProfile => Err(StatusCode::FORBIDDEN),
        }
    }
}

/// Handler parameter requiring the admin flag; rejects with 401/403.
pub struct RequireAdmin(pub SessionUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = resolve_visitor(parts, state).await?;
        match decide(user.as_ref(), Requirement::Admin) {
            Decision::Allow => Ok(Self(user.ok_or(StatusCode::UNAUTHORIZED)?)),
            Decision::RedirectSignIn => Err(StatusCode::UNAUTHORIZED),
            Decision::RedirectProfile => Err(StatusCode::FORBIDDEN),
        }
    }
}

// =============================================================================
// GATED PAGE EXTRACTOR
// =============================================================================

/// Session resolution for gated page routes: never rejects, the handler
/// applies `decide` and redirects itself.
pub struct Visitor(pub Option<SessionUser>);

impl<S> axum::extract::FromRequestParts<S> for Visitor
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        resolve_visitor(parts, state).await.map(Self)
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
