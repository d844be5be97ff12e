//! Feedback service — ratings wall with optional author attribution.

use sqlx::{PgPool, Row};
use uuid::Uuid;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("rating must be between {MIN_RATING} and {MAX_RATING}")]
    InvalidRating,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Feedback entry as the wall renders it, joined with the author's
/// profile when one exists.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FeedbackView {
    pub id: Uuid,
    pub name: String,
    /// Display label for the author's role.
    pub role: String,
    pub rating: i32,
    pub comment: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub avatar_url: String,
}

const ANONYMOUS_NAME: &str = "Utilisateur anonyme";

/// Label shown next to the author name: recruiters vs. candidates.
#[must_use]
pub fn role_label(user_type: Option<&str>) -> &'static str {
    if user_type == Some("job-poster") {
        "Recruteur"
    } else {
        "Candidat"
    }
}

/// Placeholder avatar for authors without an uploaded one.
#[must_use]
pub fn fallback_avatar_url(first_name: &str, last_name: &str) -> String {
    let first = if first_name.is_empty() { "U" } else { first_name };
    let last = if last_name.is_empty() { "A" } else { last_name };
    format!("https://ui-avatars.com/api/?name={first}+{last}&background=random")
}

fn display_name(first_name: &str, last_name: &str) -> String {
    let name = format!("{first_name} {last_name}");
    let name = name.trim();
    if name.is_empty() {
        ANONYMOUS_NAME.to_owned()
    } else {
        name.to_owned()
    }
}

/// Insert a feedback entry.
///
/// # Errors
///
/// Returns `InvalidRating` for out-of-range ratings or a database error.
pub async fn submit_feedback(
    pool: &PgPool,
    rating: i32,
    message: &str,
    user_id: Option<Uuid>,
) -> Result<Uuid, FeedbackError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(FeedbackError::InvalidRating);
    }

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO feedback (rating, message, user_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(rating)
    .bind(message.trim())
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List all feedback newest-first, joined with author profiles.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_feedback(pool: &PgPool) -> Result<Vec<FeedbackView>, FeedbackError> {
    let rows = sqlx::query(
        "SELECT f.id, f.rating, f.message,
                to_char(f.created_at, 'YYYY-MM-DD') AS date,
                COALESCE(p.first_name, '') AS first_name,
                COALESCE(p.last_name, '')  AS last_name,
                p.user_type,
                p.avatar_url
         FROM feedback f
         LEFT JOIN profiles p ON p.id = f.user_id
         ORDER BY f.created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| {
            let first_name: String = r.get("first_name");
            let last_name: String = r.get("last_name");
            let user_type: Option<String> = r.get("user_type");
            let avatar_url: Option<String> = r.get("avatar_url");
            FeedbackView {
                id: r.get("id"),
                name: display_name(&first_name, &last_name),
                role: role_label(user_type.as_deref()).to_owned(),
                rating: r.get("rating"),
                comment: r.get("message"),
                date: r.get("date"),
                avatar_url: avatar_url.unwrap_or_else(|| fallback_avatar_url(&first_name, &last_name)),
            }
        })
        .collect())
}

#[cfg(test)]
#[path = "feedback_test.rs"]
mod tests;
