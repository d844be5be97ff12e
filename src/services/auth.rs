//! Account creation and password sign-in.
//!
//! DESIGN
//! ======
//! Sign-up comes in two variants matching the two account types: job
//! seekers (personal fields plus optional starter skills) and job posters
//! (company fields). Both share the email/password/terms checks. Field
//! errors are collected into a map so the client can render them inline,
//! one message per field.
//!
//! Passwords are stored as salted SHA-256 digests with a per-user random
//! salt, the same digest idiom used for session-adjacent secrets.

use std::collections::BTreeMap;

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::services::profile;
use crate::services::role;
use crate::services::session::bytes_to_hex;

const MIN_PASSWORD_LEN: usize = 8;
const MIN_NAME_LEN: usize = 2;
const MIN_PHONE_LEN: usize = 8;

/// Per-field validation messages, keyed by form field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

// =============================================================================
// NORMALIZATION / HASHING
// =============================================================================

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

/// Generate a random 16-byte hex salt.
#[must_use]
pub fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Salted SHA-256 digest of a password, hex encoded.
#[must_use]
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

#[must_use]
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt) == expected_hash
}

// =============================================================================
// FORMS
// =============================================================================

/// Fields common to both sign-up variants.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_terms: bool,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct JobSeekerSignup {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub education: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct JobPosterSignup {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub company_name: String,
    pub contact_name: String,
    pub location: String,
    pub industry: String,
    pub phone: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
}

fn validate_credentials(c: &Credentials, errors: &mut FieldErrors) {
    if normalize_email(&c.email).is_none() {
        errors.insert("email", "Adresse e-mail invalide".to_owned());
    }
    if c.password.len() < MIN_PASSWORD_LEN {
        errors.insert(
            "password",
            "Le mot de passe doit contenir au moins 8 caractères".to_owned(),
        );
    }
    if c.password != c.confirm_password {
        errors.insert("confirm_password", "Les mots de passe ne correspondent pas".to_owned());
    }
    if !c.agree_terms {
        errors.insert(
            "agree_terms",
            "Vous devez accepter les conditions d'utilisation".to_owned(),
        );
    }
}

fn require_min(errors: &mut FieldErrors, field: &'static str, value: &str, min: usize, message: &str) {
    if value.trim().chars().count() < min {
        errors.insert(field, message.to_owned());
    }
}

/// Validate a job-seeker sign-up form. Empty map means valid.
#[must_use]
pub fn validate_job_seeker(form: &JobSeekerSignup) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validate_credentials(&form.credentials, &mut errors);
    require_min(&mut errors, "first_name", &form.first_name, MIN_NAME_LEN, "Le prénom est requis");
    require_min(&mut errors, "last_name", &form.last_name, MIN_NAME_LEN, "Le nom de famille est requis");
    require_min(&mut errors, "location", &form.location, 1, "La localisation est requise");
    errors
}

/// Validate a job-poster sign-up form. Empty map means valid.
#[must_use]
pub fn validate_job_poster(form: &JobPosterSignup) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validate_credentials(&form.credentials, &mut errors);
    require_min(&mut errors, "company_name", &form.company_name, MIN_NAME_LEN, "Le nom de l'entreprise est requis");
    require_min(&mut errors, "contact_name", &form.contact_name, MIN_NAME_LEN, "Le nom du contact est requis");
    require_min(&mut errors, "location", &form.location, 1, "La localisation est requise");
    require_min(&mut errors, "industry", &form.industry, 1, "Le secteur d'activité est requis");
    require_min(&mut errors, "phone", &form.phone, MIN_PHONE_LEN, "Le numéro de téléphone est requis");
    errors
}

/// Validate a sign-in form. Empty map means valid.
#[must_use]
pub fn validate_signin(form: &SigninForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if normalize_email(&form.email).is_none() {
        errors.insert("email", "Adresse e-mail invalide".to_owned());
    }
    if form.password.len() < MIN_PASSWORD_LEN {
        errors.insert(
            "password",
            "Le mot de passe doit contenir au moins 8 caractères".to_owned(),
        );
    }
    errors
}

/// Split a comma-separated skills field into trimmed, non-empty names.
#[must_use]
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

// =============================================================================
// SIGN-UP / SIGN-IN
// =============================================================================

async fn insert_user(conn: &mut PgConnection, email: &str, password: &str) -> Result<Uuid, AuthError> {
    let salt = generate_salt();
    let hash = hash_password(password, &salt);

    let row = sqlx::query(
        "INSERT INTO users (email, password_hash, password_salt)
         VALUES ($1, $2, $3)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(email)
    .bind(hash)
    .bind(salt)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(|r| r.get("id")).ok_or(AuthError::EmailTaken)
}

/// Register a job seeker: user + profile, plus starter skills if given.
/// The whole registration commits or rolls back as one transaction, so a
/// failed profile insert never leaves an orphan account.
///
/// # Errors
///
/// Returns `Validation` with per-field messages, `EmailTaken`, or a
/// database error.
pub async fn signup_job_seeker(pool: &PgPool, form: &JobSeekerSignup) -> Result<Uuid, AuthError> {
    let errors = validate_job_seeker(form);
    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }
    let email = normalize_email(&form.credentials.email).ok_or(AuthError::InvalidCredentials)?;

    let mut tx = pool.begin().await?;
    let user_id = insert_user(&mut tx, &email, &form.credentials.password).await?;

    sqlx::query(
        "INSERT INTO profiles (id, first_name, last_name, location, user_type)
         VALUES ($1, $2, $3, $4, 'job-seeker')",
    )
    .bind(user_id)
    .bind(form.first_name.trim())
    .bind(form.last_name.trim())
    .bind(form.location.trim())
    .execute(&mut *tx)
    .await?;

    let skills = split_skills(&form.skills);
    if !skills.is_empty() {
        profile::set_skills_tx(&mut tx, user_id, &skills).await?;
    }
    tx.commit().await?;

    Ok(user_id)
}

/// Register a job poster: user + profile with company fields.
///
/// # Errors
///
/// Returns `Validation` with per-field messages, `EmailTaken`, or a
/// database error.
pub async fn signup_job_poster(pool: &PgPool, form: &JobPosterSignup) -> Result<Uuid, AuthError> {
    let errors = validate_job_poster(form);
    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }
    let email = normalize_email(&form.credentials.email).ok_or(AuthError::InvalidCredentials)?;

    let mut tx = pool.begin().await?;
    let user_id = insert_user(&mut tx, &email, &form.credentials.password).await?;

    // Contact name and company name fill the profile name slots, as the
    // original sign-up flow did.
    sqlx::query(
        "INSERT INTO profiles (id, first_name, last_name, location, user_type, phone, industry)
         VALUES ($1, $2, $3, $4, 'job-poster', $5, $6)",
    )
    .bind(user_id)
    .bind(form.contact_name.trim())
    .bind(form.company_name.trim())
    .bind(form.location.trim())
    .bind(form.phone.trim())
    .bind(form.industry.trim())
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(user_id)
}

/// Outcome of a successful sign-in: where the client should land next.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SigninOutcome {
    pub user_id: Uuid,
    pub is_admin: bool,
    /// `/admin/dashboard` for admins, `/profile` for everyone else.
    pub redirect_to: &'static str,
}

/// Build the sign-in outcome from the stored-attribute lookup. Lookup
/// failures degrade to a non-admin outcome rather than failing the
/// sign-in, matching how session validation degrades.
fn outcome_from_lookup(user_id: Uuid, lookup: Result<Option<String>, sqlx::Error>) -> SigninOutcome {
    let is_admin = match lookup {
        Ok(stored) => role::is_admin(stored.as_deref()),
        Err(e) => {
            tracing::warn!(error = %e, %user_id, "role lookup failed during sign-in; treating as non-admin");
            false
        }
    };

    SigninOutcome {
        user_id,
        is_admin,
        redirect_to: if is_admin { "/admin/dashboard" } else { "/profile" },
    }
}

/// Verify credentials and resolve the post-login destination.
///
/// # Errors
///
/// Returns `Validation`, `InvalidCredentials`, or a database error.
pub async fn signin(pool: &PgPool, form: &SigninForm) -> Result<SigninOutcome, AuthError> {
    let errors = validate_signin(form);
    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }
    let email = normalize_email(&form.email).ok_or(AuthError::InvalidCredentials)?;

    let row = sqlx::query("SELECT id, password_hash, password_salt FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(AuthError::InvalidCredentials);
    };

    let user_id: Uuid = row.get("id");
    let hash: String = row.get("password_hash");
    let salt: String = row.get("password_salt");
    if !verify_password(&form.password, &salt, &hash) {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(outcome_from_lookup(user_id, role::lookup_stored_type(pool, user_id).await))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
