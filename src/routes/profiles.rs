//! Profile routes — public profile pages and own-profile editing.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::services::profile::{self, EducationEntry, ExperienceEntry, ProfileUpdate, ProfileView};
use crate::state::AppState;

pub(crate) fn profile_error_response(err: profile::ProfileError) -> Response {
    match err {
        profile::ProfileError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
        profile::ProfileError::Database(e) => {
            tracing::error!(error = %e, "profile database error");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn db_error_response(e: sqlx::Error) -> Response {
    tracing::error!(error = %e, "profile database error");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// `GET /api/profiles/:id` — public profile view.
pub async fn get_profile(State(state): State<AppState>, Path(profile_id): Path<Uuid>) -> Result<Json<ProfileView>, Response> {
    let view = profile::fetch_profile(&state.pool, profile_id)
        .await
        .map_err(profile_error_response)?;
    Ok(Json(view))
}

/// `GET /api/profile` — the signed-in user's own profile.
pub async fn get_own_profile(State(state): State<AppState>, auth: AuthUser) -> Result<Json<ProfileView>, Response> {
    let view = profile::fetch_profile(&state.pool, auth.user.id)
        .await
        .map_err(profile_error_response)?;
    Ok(Json(view))
}

/// `PATCH /api/profile` — update header/about fields.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Response {
    match profile::update_profile(&state.pool, auth.user.id, &update).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => profile_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct SkillsBody {
    pub skills: Vec<String>,
}

/// `PUT /api/profile/skills` — replace the skill set.
pub async fn set_skills(State(state): State<AppState>, auth: AuthUser, Json(body): Json<SkillsBody>) -> Response {
    match profile::set_skills(&state.pool, auth.user.id, &body.skills).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => db_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct ExperienceBody {
    pub experience: Vec<ExperienceEntry>,
}

/// `PUT /api/profile/experience` — replace all experience entries.
pub async fn set_experience(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ExperienceBody>,
) -> Response {
    match profile::replace_experience(&state.pool, auth.user.id, &body.experience).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => db_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct EducationBody {
    pub education: Vec<EducationEntry>,
}

/// `PUT /api/profile/education` — replace all education entries.
pub async fn set_education(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<EducationBody>,
) -> Response {
    match profile::replace_education(&state.pool, auth.user.id, &body.education).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => db_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct SocialLinksBody {
    pub links: BTreeMap<String, String>,
}

/// `PUT /api/profile/social-links` — replace social links.
pub async fn set_social_links(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SocialLinksBody>,
) -> Response {
    match profile::set_social_links(&state.pool, auth.user.id, &body.links).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => db_error_response(e),
    }
}
