use super::*;

// =============================================================================
// role_label
// =============================================================================

#[test]
fn job_poster_labeled_recruteur() {
    assert_eq!(role_label(Some("job-poster")), "Recruteur");
}

#[test]
fn everyone_else_labeled_candidat() {
    assert_eq!(role_label(Some("job-seeker")), "Candidat");
    assert_eq!(role_label(Some("admin")), "Candidat");
    assert_eq!(role_label(None), "Candidat");
}

// =============================================================================
// fallback_avatar_url
// =============================================================================

#[test]
fn fallback_avatar_uses_both_names() {
    let url = fallback_avatar_url("Amine", "Ben Salah");
    assert_eq!(url, "https://ui-avatars.com/api/?name=Amine+Ben Salah&background=random");
}

#[test]
fn fallback_avatar_defaults_empty_names() {
    let url = fallback_avatar_url("", "");
    assert_eq!(url, "https://ui-avatars.com/api/?name=U+A&background=random");
}

#[test]
fn fallback_avatar_defaults_each_name_independently() {
    assert!(fallback_avatar_url("Amine", "").contains("name=Amine+A"));
    assert!(fallback_avatar_url("", "Trabelsi").contains("name=U+Trabelsi"));
}

// =============================================================================
// display_name
// =============================================================================

#[test]
fn display_name_joins_and_trims() {
    assert_eq!(display_name("Amine", "Ben Salah"), "Amine Ben Salah");
    assert_eq!(display_name("Amine", ""), "Amine");
    assert_eq!(display_name("", "Trabelsi"), "Trabelsi");
}

#[test]
fn empty_names_fall_back_to_anonymous() {
    assert_eq!(display_name("", ""), "Utilisateur anonyme");
    assert_eq!(display_name("  ", ""), "Utilisateur anonyme");
}

// =============================================================================
// rating bounds
// =============================================================================

#[test]
fn rating_range_is_one_to_five() {
    assert!((MIN_RATING..=MAX_RATING).contains(&1));
    assert!((MIN_RATING..=MAX_RATING).contains(&5));
    assert!(!(MIN_RATING..=MAX_RATING).contains(&0));
    assert!(!(MIN_RATING..=MAX_RATING).contains(&6));
}
