//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API and the static site under a single Axum
//! router. Public pages (`/find-job`, `/about`, `/pricing`, `/feedback`,
//! `/signin`, `/signup`, `/profile`, `/profile/:id`) are registered
//! explicitly and serve the site shell; the two gated pages run the route
//! guard first and redirect on denial. Everything else falls through to
//! the static file service, which also handles the 404 catch-all.

pub mod admin;
pub mod auth;
pub mod feedback;
pub mod guard;
pub mod jobs;
pub mod profiles;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{delete, get, patch, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::role::Role;
use crate::state::AppState;

fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/signup/job-seeker", post(auth::signup_job_seeker))
        .route("/api/auth/signup/job-poster", post(auth::signup_job_poster))
        .route("/api/auth/signin", post(auth::signin))
        .route("/api/auth/signout", post(auth::signout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/wizard/step", post(jobs::wizard_advance))
        .route("/api/jobs/wizard/back", post(jobs::wizard_back))
        .route(
            "/api/jobs/{id}",
            get(jobs::get_job).delete(jobs::delete_job),
        )
        .route("/api/jobs/{id}/status", patch(jobs::set_status))
        .route("/api/jobs/{id}/view", post(jobs::record_view))
        .route("/api/profile", get(profiles::get_own_profile).patch(profiles::update_profile))
        .route("/api/profile/skills", put(profiles::set_skills))
        .route("/api/profile/experience", put(profiles::set_experience))
        .route("/api/profile/education", put(profiles::set_education))
        .route("/api/profile/social-links", put(profiles::set_social_links))
        .route("/api/profiles/{id}", get(profiles::get_profile))
        .route("/api/feedback", get(feedback::list_feedback).post(feedback::submit_feedback))
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/{id}", delete(admin::delete_user))
        .route("/api/admin/jobs", get(admin::list_jobs))
        .route("/api/admin/jobs/{id}", delete(admin::delete_job))
        .route("/api/admin/jobs/{id}/status", patch(admin::set_job_status))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Resolve the path to the static website directory.
fn website_dir() -> PathBuf {
    std::env::var("WEBSITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("website"))
}

async fn serve_page() -> Response {
    let index = website_dir().join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, path = %index.display(), "static index missing");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// `GET /post-job` — job posters only; seekers land on their profile,
/// anonymous visitors on sign-in.
async fn post_job_page(visitor: guard::Visitor) -> Response {
    let decision = guard::decide(visitor.0.as_ref(), guard::Requirement::Role(Role::JobPoster));
    match guard::redirect_for(decision) {
        Some(redirect) => redirect.into_response(),
        None => serve_page().await,
    }
}

/// `GET /admin/dashboard` — admin flag required.
async fn admin_dashboard_page(visitor: guard::Visitor) -> Response {
    let decision = guard::decide(visitor.0.as_ref(), guard::Requirement::Admin);
    match guard::redirect_for(decision) {
        Some(redirect) => redirect.into_response(),
        None => serve_page().await,
    }
}

/// Full application: API routes, gated pages, static site fallback.
pub fn app(state: AppState) -> Router {
    let website_service = ServeDir::new(website_dir()).append_index_html_on_directories(true);

    api_routes(state.clone())
        .route("/find-job", get(serve_page))
        .route("/about", get(serve_page))
        .route("/pricing", get(serve_page))
        .route("/feedback", get(serve_page))
        .route("/signin", get(serve_page))
        .route("/signup", get(serve_page))
        .route("/profile", get(serve_page))
        .route("/profile/{id}", get(serve_page))
        .route("/post-job", get(post_job_page).with_state(state.clone()))
        .route("/admin/dashboard", get(admin_dashboard_page).with_state(state))
        .fallback_service(website_service)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
