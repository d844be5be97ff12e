//! Admin back-office routes — stats, user/job tables, moderation.
//!
//! List endpoints fetch every row and filter in memory with the pure
//! predicates below, matching the admin tables' behavior (no pagination,
//! no server-side filtering).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::Row;
use uuid::Uuid;

use crate::routes::guard::RequireAdmin;
use crate::routes::jobs::job_error_response;
use crate::services::job::{self, AdminJobFilter, JobRow, JobStatus, JobType};
use crate::state::AppState;

// =============================================================================
// STATS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub job_seekers: i64,
    pub job_posters: i64,
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub total_feedback: i64,
}

/// `GET /api/admin/stats` — dashboard totals.
pub async fn stats(State(state): State<AppState>, _admin: RequireAdmin) -> Result<Json<AdminStats>, StatusCode> {
    let row = sqlx::query(
        r"SELECT
              (SELECT COUNT(*) FROM users)                                        AS total_users,
              (SELECT COUNT(*) FROM profiles WHERE user_type = 'job-seeker')      AS job_seekers,
              (SELECT COUNT(*) FROM profiles WHERE user_type = 'job-poster')      AS job_posters,
              (SELECT COUNT(*) FROM jobs)                                         AS total_jobs,
              (SELECT COUNT(*) FROM jobs WHERE status = 'active')                 AS active_jobs,
              (SELECT COUNT(*) FROM feedback)                                     AS total_feedback",
    )
    .fetch_one(&state.pool)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(AdminStats {
        total_users: row.get("total_users"),
        job_seekers: row.get("job_seekers"),
        job_posters: row.get("job_posters"),
        total_jobs: row.get("total_jobs"),
        active_jobs: row.get("active_jobs"),
        total_feedback: row.get("total_feedback"),
    }))
}

// =============================================================================
// USERS TABLE
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserListRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: Option<String>,
    pub status: String,
    pub created_at: String,
}

/// Admin users-table filter: search over name/email, exact status and
/// account-type selections (`None` = all).
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: String,
    pub status: Option<String>,
    pub user_type: Option<String>,
}

#[must_use]
pub(crate) fn matches_user_filter(user: &UserListRow, filter: &UserFilter) -> bool {
    let term = filter.search.to_lowercase();
    let matches_term = term.is_empty()
        || user.name.to_lowercase().contains(&term)
        || user.email.to_lowercase().contains(&term);

    let matches_status = filter.status.as_deref().is_none_or(|s| s == user.status);
    let matches_type = filter.user_type.as_deref().is_none_or(|t| Some(t) == user.user_type.as_deref());

    matches_term && matches_status && matches_type
}

#[must_use]
pub(crate) fn filter_users(users: Vec<UserListRow>, filter: &UserFilter) -> Vec<UserListRow> {
    users.into_iter().filter(|u| matches_user_filter(u, filter)).collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    #[serde(default)]
    pub search: String,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<String>,
}

/// `GET /api/admin/users` — all accounts, filtered in memory.
pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserListRow>>, StatusCode> {
    let rows = sqlx::query(
        r"SELECT u.id, u.email,
                 trim(concat(p.first_name, ' ', p.last_name)) AS name,
                 p.user_type,
                 COALESCE(p.status, 'active') AS status,
                 to_char(u.created_at, 'YYYY-MM-DD') AS created_at
          FROM users u
          LEFT JOIN profiles p ON p.id = u.id
          ORDER BY u.created_at DESC",
    )
    .fetch_all(&state.pool)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let users: Vec<UserListRow> = rows
        .into_iter()
        .map(|r| UserListRow {
            id: r.get("id"),
            name: r.get("name"),
            email: r.get("email"),
            user_type: r.get("user_type"),
            status: r.get("status"),
            created_at: r.get("created_at"),
        })
        .collect();

    let filter = UserFilter {
        search: query.search,
        status: query.status.filter(|s| s != "all"),
        user_type: query.user_type.filter(|t| t != "all"),
    };
    Ok(Json(filter_users(users, &filter)))
}

/// `DELETE /api/admin/users/:id` — remove an account; sessions, profile
/// and dependents cascade.
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({ "ok": true })))
}

// =============================================================================
// JOBS TABLE
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    #[serde(default)]
    pub search: String,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
}

impl JobListQuery {
    pub(crate) fn into_filter(self) -> AdminJobFilter {
        AdminJobFilter {
            search: self.search,
            status: self.status.as_deref().and_then(JobStatus::parse),
            job_type: self.job_type.as_deref().and_then(JobType::parse),
        }
    }
}

/// `GET /api/admin/jobs` — every posting, filtered in memory.
pub async fn list_jobs(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<JobListQuery>,
) -> Result<Json<Vec<JobRow>>, Response> {
    let jobs = job::list_all_jobs(&state.pool)
        .await
        .map_err(job_error_response)?;
    Ok(Json(job::filter_admin_jobs(jobs, &query.into_filter())))
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: JobStatus,
}

/// `PATCH /api/admin/jobs/:id/status` — activate/deactivate any posting.
pub async fn set_job_status(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(job_id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Response {
    match job::set_job_status(&state.pool, job_id, body.status, None).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => job_error_response(e),
    }
}

/// `DELETE /api/admin/jobs/:id` — remove any posting.
pub async fn delete_job(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(job_id): Path<Uuid>,
) -> Response {
    match job::delete_job(&state.pool, job_id, None).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => job_error_response(e),
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
