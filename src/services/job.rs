//! Job service — posting CRUD, listing filters, and view counters.
//!
//! DESIGN
//! ======
//! List endpoints fetch the full job set and filter in memory with the
//! pure predicates below; the original admin tables and search page
//! filtered an already-fetched array the same way, and the data volume
//! of a niche board does not warrant server-side filtering or pagination.

use sqlx::PgPool;
use uuid::Uuid;

use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("job not found: {0}")]
    NotFound(Uuid),
    #[error("validation failed")]
    Validation(crate::services::auth::FieldErrors),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Contract type of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::Contract => "contract",
            Self::Internship => "internship",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "full-time" => Some(Self::FullTime),
            "part-time" => Some(Self::PartTime),
            "contract" => Some(Self::Contract),
            "internship" => Some(Self::Internship),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Active,
    Inactive,
}

impl JobStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// Row returned from job queries.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub description: String,
    pub requirements: String,
    pub salary: Option<String>,
    pub status: String,
    pub views: i32,
    pub applications: i32,
    pub posted_by: Option<Uuid>,
    pub posted_at: String,
}

/// Fields for a new posting, accumulated by the posting wizard.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct JobForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub job_type: JobType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub salary: Option<String>,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            job_type: JobType::FullTime,
            description: String::new(),
            requirements: String::new(),
            salary: None,
        }
    }
}

// =============================================================================
// IN-MEMORY FILTERS
// =============================================================================

/// Public search-page filter (FindJob): free-text search, location
/// substring, and a set of accepted contract types (empty = all).
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SearchFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub types: Vec<JobType>,
}

/// Admin table filter: search over title/company, plus exact status and
/// type selections (`None` = all).
#[derive(Debug, Clone, Default)]
pub struct AdminJobFilter {
    pub search: String,
    pub status: Option<JobStatus>,
    pub job_type: Option<JobType>,
}

#[must_use]
pub fn matches_search(job: &JobRow, filter: &SearchFilter) -> bool {
    let term = filter.search.to_lowercase();
    let matches_term = term.is_empty()
        || job.title.to_lowercase().contains(&term)
        || job.company.to_lowercase().contains(&term)
        || job.description.to_lowercase().contains(&term);

    let loc = filter.location.to_lowercase();
    let matches_location = loc.is_empty() || job.location.to_lowercase().contains(&loc);

    let matches_type =
        filter.types.is_empty() || filter.types.iter().any(|t| t.as_str() == job.job_type);

    matches_term && matches_location && matches_type
}

#[must_use]
pub fn matches_admin_filter(job: &JobRow, filter: &AdminJobFilter) -> bool {
    let term = filter.search.to_lowercase();
    let matches_term = term.is_empty()
        || job.title.to_lowercase().contains(&term)
        || job.company.to_lowercase().contains(&term);

    let matches_status = filter.status.is_none_or(|s| s.as_str() == job.status);
    let matches_type = filter.job_type.is_none_or(|t| t.as_str() == job.job_type);

    matches_term && matches_status && matches_type
}

/// Apply the public search filter over an already-fetched job list.
#[must_use]
pub fn filter_jobs(jobs: Vec<JobRow>, filter: &SearchFilter) -> Vec<JobRow> {
    jobs.into_iter().filter(|j| matches_search(j, filter)).collect()
}

/// Apply the admin table filter over an already-fetched job list.
#[must_use]
pub fn filter_admin_jobs(jobs: Vec<JobRow>, filter: &AdminJobFilter) -> Vec<JobRow> {
    jobs.into_iter().filter(|j| matches_admin_filter(j, filter)).collect()
}

// =============================================================================
// CRUD
// =============================================================================

type JobTuple = (
    Uuid,
    String,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    i32,
    i32,
    Option<Uuid>,
    String,
);

fn row_from_tuple(t: JobTuple) -> JobRow {
    let (id, title, company, location, job_type, description, requirements, salary, status, views, applications, posted_by, posted_at) =
        t;
    JobRow {
        id,
        title,
        company,
        location,
        job_type,
        description,
        requirements,
        salary,
        status,
        views,
        applications,
        posted_by,
        posted_at,
    }
}

const JOB_COLUMNS: &str = "id, title, company, location, job_type, description, requirements, salary, status, \
                           views, applications, posted_by, to_char(created_at, 'YYYY-MM-DD') AS posted_at";

/// List all active jobs, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_active_jobs(pool: &PgPool) -> Result<Vec<JobRow>, JobError> {
    let rows = sqlx::query_as::<_, JobTuple>(&format!(
        "SELECT {JOB_COLUMNS} FROM jobs WHERE status = 'active' ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_from_tuple).collect())
}

/// List every job regardless of status (admin view), newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_all_jobs(pool: &PgPool) -> Result<Vec<JobRow>, JobError> {
    let rows = sqlx::query_as::<_, JobTuple>(&format!(
        "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_from_tuple).collect())
}

/// Fetch one job by id.
///
/// # Errors
///
/// Returns `NotFound` or a database error.
pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<JobRow, JobError> {
    let row = sqlx::query_as::<_, JobTuple>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
        .bind(job_id)
        .fetch_optional(pool)
        .await?;

    row.map(row_from_tuple).ok_or(JobError::NotFound(job_id))
}

/// Insert a fully validated posting owned by `posted_by`. Status starts
/// active with zeroed counters.
///
/// # Errors
///
/// Returns `Validation` with per-field messages or a database error.
pub async fn create_job(pool: &PgPool, form: &JobForm, posted_by: Uuid) -> Result<Uuid, JobError> {
    let errors = crate::services::wizard::validate_full(form);
    if !errors.is_empty() {
        return Err(JobError::Validation(errors));
    }

    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO jobs (id, title, company, location, job_type, description, requirements, salary, posted_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(id)
    .bind(form.title.trim())
    .bind(form.company.trim())
    .bind(form.location.trim())
    .bind(form.job_type.as_str())
    .bind(form.description.trim())
    .bind(form.requirements.trim())
    .bind(form.salary.as_deref().map(str::trim).filter(|s| !s.is_empty()))
    .bind(posted_by)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Set a job's status. When `owner` is given the update is scoped to
/// jobs posted by that user; admins pass `None`.
///
/// # Errors
///
/// Returns `NotFound` if no matching row, or a database error.
pub async fn set_job_status(
    pool: &PgPool,
    job_id: Uuid,
    status: JobStatus,
    owner: Option<Uuid>,
) -> Result<(), JobError> {
    let result = match owner {
        Some(user_id) => {
            sqlx::query("UPDATE jobs SET status = $2 WHERE id = $1 AND posted_by = $3")
                .bind(job_id)
                .bind(status.as_str())
                .bind(user_id)
                .execute(pool)
                .await?
        }
        None => {
            sqlx::query("UPDATE jobs SET status = $2 WHERE id = $1")
                .bind(job_id)
                .bind(status.as_str())
                .execute(pool)
                .await?
        }
    };

    if result.rows_affected() == 0 {
        return Err(JobError::NotFound(job_id));
    }
    Ok(())
}

/// Delete a job, optionally scoped to its owner.
///
/// # Errors
///
/// Returns `NotFound` if no matching row, or a database error.
pub async fn delete_job(pool: &PgPool, job_id: Uuid, owner: Option<Uuid>) -> Result<(), JobError> {
    let result = match owner {
        Some(user_id) => {
            sqlx::query("DELETE FROM jobs WHERE id = $1 AND posted_by = $2")
                .bind(job_id)
                .bind(user_id)
                .execute(pool)
                .await?
        }
        None => {
            sqlx::query("DELETE FROM jobs WHERE id = $1")
                .bind(job_id)
                .execute(pool)
                .await?
        }
    };

    if result.rows_affected() == 0 {
        return Err(JobError::NotFound(job_id));
    }
    Ok(())
}

// =============================================================================
// VIEW COUNTER
// =============================================================================

/// Increment a job's view counter.
///
/// # Errors
///
/// Returns a database error if the update fails.
pub async fn increment_views(pool: &PgPool, job_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE jobs SET views = views + 1 WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Fire-and-forget view increment: spawned so the render path never waits
/// on the counter, errors are logged and dropped.
pub fn spawn_view_increment(state: &AppState, job_id: Uuid) {
    let pool = state.pool.clone();
    tokio::spawn(async move {
        if let Err(e) = increment_views(&pool, job_id).await {
            tracing::warn!(error = %e, %job_id, "view counter increment failed");
        }
    });
}

#[cfg(test)]
#[path = "job_test.rs"]
mod tests;
