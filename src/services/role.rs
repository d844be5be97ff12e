//! Effective-role resolution.
//!
//! DESIGN
//! ======
//! A user's role comes from the stored `profiles.user_type` attribute when
//! present. When the attribute is absent (accounts predating the column),
//! the role is inferred from the email address: anything containing
//! `employer` or `job-poster` is treated as a job poster, everything else
//! as a job seeker. The admin flag is only ever derived from the stored
//! attribute, never from the email.
//!
//! The email heuristic is inherited legacy behavior: a seeker whose address
//! happens to contain "employer" is silently classified as a poster. It is
//! part of the observable contract, so it lives here and nowhere else.

use sqlx::PgPool;
use uuid::Uuid;

/// Effective user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    JobSeeker,
    JobPoster,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::JobSeeker => "job-seeker",
            Self::JobPoster => "job-poster",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Self::Admin),
            "job-seeker" => Some(Self::JobSeeker),
            "job-poster" => Some(Self::JobPoster),
            _ => None,
        }
    }
}

/// Infer a role from the email address alone (legacy fallback).
#[must_use]
pub fn infer_from_email(email: &str) -> Role {
    if email.contains("employer") || email.contains("job-poster") {
        Role::JobPoster
    } else {
        Role::JobSeeker
    }
}

/// Resolve the effective role from the stored attribute, falling back to
/// the email heuristic when the attribute is absent or unrecognized.
#[must_use]
pub fn resolve(stored: Option<&str>, email: &str) -> Role {
    stored
        .and_then(Role::parse)
        .unwrap_or_else(|| infer_from_email(email))
}

/// Whether the stored attribute marks the user as an admin.
#[must_use]
pub fn is_admin(stored: Option<&str>) -> bool {
    stored == Some("admin")
}

/// Fetch the stored `user_type` attribute for a user, if any.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn lookup_stored_type(pool: &PgPool, user_id: Uuid) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_type FROM profiles WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map(Option::flatten)
}

/// Resolve the effective role for a user, degrading to the email heuristic
/// if the profile lookup fails. Lookup errors never block the request.
pub async fn resolve_for_user(pool: &PgPool, user_id: Uuid, email: &str) -> (Role, bool) {
    match lookup_stored_type(pool, user_id).await {
        Ok(stored) => {
            let role = resolve(stored.as_deref(), email);
            (role, is_admin(stored.as_deref()))
        }
        Err(e) => {
            tracing::warn!(error = %e, %user_id, "role lookup failed; falling back to email heuristic");
            (infer_from_email(email), false)
        }
    }
}

#[cfg(test)]
#[path = "role_test.rs"]
mod tests;
