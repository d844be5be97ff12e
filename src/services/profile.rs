//! Profile service — public profile assembly and own-profile mutations.
//!
//! DESIGN
//! ======
//! A profile view is the profile row joined with its skills, experience,
//! education, and social links. Mutations are replace-style: the edit
//! surfaces submit the whole section, so skills/experience/education are
//! deleted and reinserted wholesale, scoped to the session user. Each
//! replace runs in one transaction, so a failed insert never leaves the
//! section half-deleted.

use std::collections::BTreeMap;

use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, serde::Serialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub location: String,
    pub about: String,
    pub avatar_url: Option<String>,
    pub user_type: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    /// ISO date, `YYYY-MM-DD`.
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
}

/// Full profile as the profile page renders it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: ProfileRow,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    /// Keyed by lowercased platform name.
    pub social_links: BTreeMap<String, String>,
}

/// Editable header fields of the own profile.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
}

// =============================================================================
// FETCH
// =============================================================================

/// Assemble the full profile view for one user.
///
/// # Errors
///
/// Returns `NotFound` when no profile row exists, or a database error.
pub async fn fetch_profile(pool: &PgPool, profile_id: Uuid) -> Result<ProfileView, ProfileError> {
    let row = sqlx::query(
        "SELECT id, first_name, last_name, title, location, about, avatar_url, user_type
         FROM profiles WHERE id = $1",
    )
    .bind(profile_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ProfileError::NotFound(profile_id))?;

    let profile = ProfileRow {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        title: row.get("title"),
        location: row.get("location"),
        about: row.get("about"),
        avatar_url: row.get("avatar_url"),
        user_type: row.get("user_type"),
    };

    let skills: Vec<String> = sqlx::query_scalar(
        "SELECT s.name FROM profile_skills ps
         JOIN skills s ON s.id = ps.skill_id
         WHERE ps.profile_id = $1
         ORDER BY s.name",
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?;

    let experience = sqlx::query_as::<_, (String, String, String, Option<String>, String)>(
        "SELECT role, company,
                to_char(start_date, 'YYYY-MM-DD'),
                to_char(end_date, 'YYYY-MM-DD'),
                description
         FROM experience
         WHERE profile_id = $1
         ORDER BY start_date DESC",
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|(role, company, start_date, end_date, description)| ExperienceEntry {
        role,
        company,
        start_date,
        end_date,
        description,
    })
    .collect();

    let education = sqlx::query_as::<_, (String, String, i32, String)>(
        "SELECT degree, institution, year, description
         FROM education
         WHERE profile_id = $1
         ORDER BY year DESC",
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|(degree, institution, year, description)| EducationEntry { degree, institution, year, description })
    .collect();

    let links = sqlx::query_as::<_, (String, String)>(
        "SELECT platform, url FROM social_links WHERE profile_id = $1",
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?;

    let social_links = links
        .into_iter()
        .map(|(platform, url)| (platform.to_lowercase(), url))
        .collect();

    Ok(ProfileView { profile, skills, experience, education, social_links })
}

// =============================================================================
// MUTATIONS
// =============================================================================

/// Patch the header/about fields that were provided.
///
/// # Errors
///
/// Returns `NotFound` when no profile row exists, or a database error.
pub async fn update_profile(pool: &PgPool, profile_id: Uuid, update: &ProfileUpdate) -> Result<(), ProfileError> {
    let result = sqlx::query(
        "UPDATE profiles SET
             first_name = COALESCE($2, first_name),
             last_name  = COALESCE($3, last_name),
             title      = COALESCE($4, title),
             location   = COALESCE($5, location),
             about      = COALESCE($6, about),
             avatar_url = COALESCE($7, avatar_url)
         WHERE id = $1",
    )
    .bind(profile_id)
    .bind(update.first_name.as_deref())
    .bind(update.last_name.as_deref())
    .bind(update.title.as_deref())
    .bind(update.location.as_deref())
    .bind(update.about.as_deref())
    .bind(update.avatar_url.as_deref())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ProfileError::NotFound(profile_id));
    }
    Ok(())
}

/// Replace the profile's skill set. Skill names are created on first use
/// and shared across profiles.
///
/// # Errors
///
/// Returns a database error if any statement fails.
pub async fn set_skills(pool: &PgPool, profile_id: Uuid, names: &[String]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    set_skills_tx(&mut tx, profile_id, names).await?;
    tx.commit().await
}

/// Transaction body of `set_skills`, shared with sign-up so starter
/// skills join the account's own transaction.
pub(crate) async fn set_skills_tx(
    conn: &mut PgConnection,
    profile_id: Uuid,
    names: &[String],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM profile_skills WHERE profile_id = $1")
        .bind(profile_id)
        .execute(&mut *conn)
        .await?;

    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        // Upsert keeps the statement race-free and always returns the id.
        let skill_id: Uuid = sqlx::query_scalar(
            "INSERT INTO skills (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query(
            "INSERT INTO profile_skills (profile_id, skill_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(profile_id)
        .bind(skill_id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Replace all experience entries for a profile.
///
/// # Errors
///
/// Returns a database error if any statement fails.
pub async fn replace_experience(
    pool: &PgPool,
    profile_id: Uuid,
    entries: &[ExperienceEntry],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM experience WHERE profile_id = $1")
        .bind(profile_id)
        .execute(&mut *tx)
        .await?;

    for entry in entries {
        sqlx::query(
            "INSERT INTO experience (profile_id, role, company, start_date, end_date, description)
             VALUES ($1, $2, $3, $4::date, $5::date, $6)",
        )
        .bind(profile_id)
        .bind(&entry.role)
        .bind(&entry.company)
        .bind(&entry.start_date)
        .bind(entry.end_date.as_deref())
        .bind(&entry.description)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

/// Replace all education entries for a profile.
///
/// # Errors
///
/// Returns a database error if any statement fails.
pub async fn replace_education(
    pool: &PgPool,
    profile_id: Uuid,
    entries: &[EducationEntry],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM education WHERE profile_id = $1")
        .bind(profile_id)
        .execute(&mut *tx)
        .await?;

    for entry in entries {
        sqlx::query(
            "INSERT INTO education (profile_id, degree, institution, year, description)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(profile_id)
        .bind(&entry.degree)
        .bind(&entry.institution)
        .bind(entry.year)
        .bind(&entry.description)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

/// Replace the profile's social links. Platforms are stored lowercased so
/// the view map is stable.
///
/// # Errors
///
/// Returns a database error if any statement fails.
pub async fn set_social_links(
    pool: &PgPool,
    profile_id: Uuid,
    links: &BTreeMap<String, String>,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM social_links WHERE profile_id = $1")
        .bind(profile_id)
        .execute(&mut *tx)
        .await?;

    for (platform, url) in links {
        let platform = platform.trim().to_lowercase();
        if platform.is_empty() || url.trim().is_empty() {
            continue;
        }
        sqlx::query("INSERT INTO social_links (profile_id, platform, url) VALUES ($1, $2, $3)")
            .bind(profile_id)
            .bind(platform)
            .bind(url.trim())
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
