use super::*;
use crate::services::role::Role;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_encodes_lowercase() {
    assert_eq!(bytes_to_hex(&[0x00, 0xff, 0x0a]), "00ff0a");
}

#[test]
fn bytes_to_hex_empty_input() {
    assert_eq!(bytes_to_hex(&[]), "");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn tokens_are_unique() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// SessionUser serialization
// =============================================================================

#[test]
fn session_user_serializes_role_kebab_case() {
    let user = SessionUser {
        id: Uuid::nil(),
        email: "user@example.com".into(),
        name: "Amine Ben Salah".into(),
        role: Role::JobPoster,
        is_admin: false,
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["role"], "job-poster");
    assert_eq!(json["is_admin"], false);
    assert_eq!(json["name"], "Amine Ben Salah");
}
