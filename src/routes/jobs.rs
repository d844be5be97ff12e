//! Job routes — public search, posting wizard, owner management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::routes::guard::RequireJobPoster;
use crate::services::job::{self, JobRow, JobStatus, JobType, SearchFilter};
use crate::services::wizard::{self, WizardState};
use crate::state::AppState;

pub(crate) fn job_error_response(err: job::JobError) -> Response {
    match err {
        job::JobError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
        job::JobError::Validation(fields) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": fields }))).into_response()
        }
        job::JobError::Database(e) => {
            tracing::error!(error = %e, "job database error");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Query-string form of the search filter (`types` comma-separated).
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub types: String,
}

impl SearchQuery {
    pub(crate) fn into_filter(self) -> SearchFilter {
        let types = self
            .types
            .split(',')
            .filter_map(|raw| JobType::parse(raw.trim()))
            .collect();
        SearchFilter { search: self.search, location: self.location, types }
    }
}

/// `GET /api/jobs` — active postings, filtered in memory.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<JobRow>>, Response> {
    let jobs = job::list_active_jobs(&state.pool)
        .await
        .map_err(job_error_response)?;
    Ok(Json(job::filter_jobs(jobs, &query.into_filter())))
}

/// `GET /api/jobs/:id` — one posting. Rendering a job card counts as a
/// view; the increment is spawned and never awaited.
pub async fn get_job(State(state): State<AppState>, Path(job_id): Path<Uuid>) -> Result<Json<JobRow>, Response> {
    let row = job::get_job(&state.pool, job_id)
        .await
        .map_err(job_error_response)?;

    job::spawn_view_increment(&state, job_id);
    Ok(Json(row))
}

/// `POST /api/jobs/:id/view` — explicit fire-and-forget view increment.
pub async fn record_view(State(state): State<AppState>, Path(job_id): Path<Uuid>) -> StatusCode {
    job::spawn_view_increment(&state, job_id);
    StatusCode::ACCEPTED
}

/// `POST /api/jobs/wizard/step` — validate the current step and advance.
/// The full form state round-trips with the client; nothing is persisted.
pub async fn wizard_advance(Json(state): Json<WizardState>) -> Response {
    match wizard::advance(state) {
        Ok(next) => Json(next).into_response(),
        Err(errors) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errors }))).into_response()
        }
    }
}

/// `POST /api/jobs/wizard/back` — step back, keeping accumulated fields.
pub async fn wizard_back(Json(state): Json<WizardState>) -> Json<WizardState> {
    Json(wizard::back(state))
}

/// `POST /api/jobs` — final wizard submit. Job-poster only.
pub async fn create_job(
    State(state): State<AppState>,
    poster: RequireJobPoster,
    Json(form): Json<job::JobForm>,
) -> Response {
    match job::create_job(&state.pool, &form, poster.0.id).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => job_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: JobStatus,
}

/// `PATCH /api/jobs/:id/status` — owner toggles their own posting.
pub async fn set_status(
    State(state): State<AppState>,
    poster: RequireJobPoster,
    Path(job_id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Response {
    match job::set_job_status(&state.pool, job_id, body.status, Some(poster.0.id)).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => job_error_response(e),
    }
}

/// `DELETE /api/jobs/:id` — owner deletes their own posting.
pub async fn delete_job(
    State(state): State<AppState>,
    poster: RequireJobPoster,
    Path(job_id): Path<Uuid>,
) -> Response {
    match job::delete_job(&state.pool, job_id, Some(poster.0.id)).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => job_error_response(e),
    }
}

#[cfg(test)]
#[path = "jobs_test.rs"]
mod tests;
