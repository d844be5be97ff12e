use super::*;

fn credentials() -> Credentials {
    Credentials {
        email: "user@example.com".into(),
        password: "motdepasse".into(),
        confirm_password: "motdepasse".into(),
        agree_terms: true,
    }
}

fn seeker_form() -> JobSeekerSignup {
    JobSeekerSignup {
        credentials: credentials(),
        first_name: "Amine".into(),
        last_name: "Ben Salah".into(),
        location: "Tunis".into(),
        skills: String::new(),
        education: String::new(),
    }
}

fn poster_form() -> JobPosterSignup {
    JobPosterSignup {
        credentials: credentials(),
        company_name: "EcoForest Solutions".into(),
        contact_name: "Leila Trabelsi".into(),
        location: "Sfax".into(),
        industry: "Agriculture & Foresterie".into(),
        phone: "+216 20 123 456".into(),
    }
}

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_lowercases_and_trims() {
    assert_eq!(normalize_email("  User@Example.COM  "), Some("user@example.com".into()));
}

#[test]
fn normalize_email_rejects_missing_at() {
    assert_eq!(normalize_email("userexample.com"), None);
}

#[test]
fn normalize_email_rejects_empty_parts() {
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("user@"), None);
    assert_eq!(normalize_email(""), None);
}

#[test]
fn normalize_email_rejects_multiple_ats() {
    assert_eq!(normalize_email("a@b@c.com"), None);
}

// =============================================================================
// password hashing
// =============================================================================

#[test]
fn hash_password_verifies_round_trip() {
    let salt = generate_salt();
    let hash = hash_password("motdepasse", &salt);
    assert!(verify_password("motdepasse", &salt, &hash));
}

#[test]
fn verify_rejects_wrong_password() {
    let salt = generate_salt();
    let hash = hash_password("motdepasse", &salt);
    assert!(!verify_password("motdepass", &salt, &hash));
}

#[test]
fn same_password_different_salts_differ() {
    let a = hash_password("motdepasse", &generate_salt());
    let b = hash_password("motdepasse", &generate_salt());
    assert_ne!(a, b);
}

#[test]
fn generate_salt_is_32_hex_chars() {
    let salt = generate_salt();
    assert_eq!(salt.len(), 32);
    assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn hash_is_64_hex_chars() {
    let hash = hash_password("x", "salt");
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

// =============================================================================
// validate_signin — one clean pass means one sign-in call
// =============================================================================

#[test]
fn valid_signin_form_passes() {
    let form = SigninForm { email: "user@example.com".into(), password: "motdepasse".into() };
    assert!(validate_signin(&form).is_empty());
}

#[test]
fn signin_rejects_invalid_email() {
    let form = SigninForm { email: "not-an-email".into(), password: "motdepasse".into() };
    let errors = validate_signin(&form);
    assert!(errors.contains_key("email"));
    assert!(!errors.contains_key("password"));
}

#[test]
fn signin_rejects_short_password() {
    let form = SigninForm { email: "user@example.com".into(), password: "court".into() };
    let errors = validate_signin(&form);
    assert!(errors.contains_key("password"));
}

// =============================================================================
// validate_job_seeker
// =============================================================================

#[test]
fn valid_seeker_form_passes() {
    assert!(validate_job_seeker(&seeker_form()).is_empty());
}

#[test]
fn seeker_requires_names_and_location() {
    let mut form = seeker_form();
    form.first_name = "A".into();
    form.last_name = String::new();
    form.location = " ".into();
    let errors = validate_job_seeker(&form);
    assert!(errors.contains_key("first_name"));
    assert!(errors.contains_key("last_name"));
    assert!(errors.contains_key("location"));
}

#[test]
fn seeker_requires_matching_passwords() {
    let mut form = seeker_form();
    form.credentials.confirm_password = "autrechose".into();
    let errors = validate_job_seeker(&form);
    assert!(errors.contains_key("confirm_password"));
}

#[test]
fn seeker_requires_terms() {
    let mut form = seeker_form();
    form.credentials.agree_terms = false;
    let errors = validate_job_seeker(&form);
    assert!(errors.contains_key("agree_terms"));
}

#[test]
fn seeker_skills_and_education_are_optional() {
    let form = seeker_form();
    assert!(form.skills.is_empty());
    assert!(validate_job_seeker(&form).is_empty());
}

// =============================================================================
// validate_job_poster
// =============================================================================

#[test]
fn valid_poster_form_passes() {
    assert!(validate_job_poster(&poster_form()).is_empty());
}

#[test]
fn poster_requires_company_fields() {
    let mut form = poster_form();
    form.company_name = "X".into();
    form.industry = String::new();
    form.phone = "123".into();
    let errors = validate_job_poster(&form);
    assert!(errors.contains_key("company_name"));
    assert!(errors.contains_key("industry"));
    assert!(errors.contains_key("phone"));
}

#[test]
fn poster_password_rules_match_seeker_rules() {
    let mut form = poster_form();
    form.credentials.password = "court".into();
    form.credentials.confirm_password = "court".into();
    let errors = validate_job_poster(&form);
    assert!(errors.contains_key("password"));
}

#[test]
fn poster_phone_of_min_length_passes() {
    let mut form = poster_form();
    form.phone = "20123456".into();
    assert!(validate_job_poster(&form).is_empty());

    form.phone = "2012345".into();
    assert!(validate_job_poster(&form).contains_key("phone"));
}

// =============================================================================
// sign-in outcome
// =============================================================================

#[test]
fn admin_attribute_lands_on_dashboard() {
    let outcome = outcome_from_lookup(Uuid::nil(), Ok(Some("admin".into())));
    assert!(outcome.is_admin);
    assert_eq!(outcome.redirect_to, "/admin/dashboard");
}

#[test]
fn non_admin_attribute_lands_on_profile() {
    let outcome = outcome_from_lookup(Uuid::nil(), Ok(Some("job-seeker".into())));
    assert!(!outcome.is_admin);
    assert_eq!(outcome.redirect_to, "/profile");

    let outcome = outcome_from_lookup(Uuid::nil(), Ok(None));
    assert!(!outcome.is_admin);
}

#[test]
fn failed_lookup_degrades_to_non_admin() {
    let outcome = outcome_from_lookup(Uuid::nil(), Err(sqlx::Error::PoolClosed));
    assert!(!outcome.is_admin);
    assert_eq!(outcome.redirect_to, "/profile");
}

// =============================================================================
// split_skills
// =============================================================================

#[test]
fn split_skills_trims_and_drops_empties() {
    let skills = split_skills(" Gestion forestière , SIG ,, Biodiversité ");
    assert_eq!(skills, vec!["Gestion forestière", "SIG", "Biodiversité"]);
}

#[test]
fn split_skills_empty_input_yields_nothing() {
    assert!(split_skills("").is_empty());
    assert!(split_skills("  ,  , ").is_empty());
}

// =============================================================================
// form deserialization
// =============================================================================

#[test]
fn seeker_form_deserializes_flattened_credentials() {
    let json = r#"{
        "email": "user@example.com",
        "password": "motdepasse",
        "confirm_password": "motdepasse",
        "agree_terms": true,
        "first_name": "Amine",
        "last_name": "Ben Salah",
        "location": "Tunis"
    }"#;
    let form: JobSeekerSignup = serde_json::from_str(json).unwrap();
    assert_eq!(form.credentials.email, "user@example.com");
    assert!(form.skills.is_empty());
    assert!(validate_job_seeker(&form).is_empty());
}
