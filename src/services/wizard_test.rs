use super::*;
use crate::services::job::JobType;

fn basics_form() -> JobForm {
    JobForm {
        title: "Ingénieur Forestier".into(),
        company: "EcoForest Solutions".into(),
        location: "Tunis".into(),
        job_type: JobType::FullTime,
        ..JobForm::default()
    }
}

fn full_form() -> JobForm {
    JobForm {
        description: "Supervision de projets de reforestation".into(),
        requirements: "Diplôme en sciences forestières".into(),
        salary: Some("45 000 TND".into()),
        ..basics_form()
    }
}

// =============================================================================
// validate_step
// =============================================================================

#[test]
fn step_one_requires_basics() {
    let errors = validate_step(FIRST_STEP, &JobForm::default());
    assert!(errors.contains_key("title"));
    assert!(errors.contains_key("company"));
    assert!(errors.contains_key("location"));
    assert!(!errors.contains_key("description"));
}

#[test]
fn step_one_accepts_complete_basics() {
    assert!(validate_step(FIRST_STEP, &basics_form()).is_empty());
}

#[test]
fn step_one_rejects_whitespace_only_fields() {
    let form = JobForm { title: "   ".into(), ..basics_form() };
    let errors = validate_step(FIRST_STEP, &form);
    assert!(errors.contains_key("title"));
}

#[test]
fn step_two_requires_description_and_requirements() {
    let errors = validate_step(2, &basics_form());
    assert!(errors.contains_key("description"));
    assert!(errors.contains_key("requirements"));
    assert!(!errors.contains_key("title"));
}

#[test]
fn review_step_validates_nothing() {
    assert!(validate_step(LAST_STEP, &JobForm::default()).is_empty());
}

#[test]
fn validate_full_covers_both_steps() {
    let errors = validate_full(&JobForm::default());
    assert!(errors.contains_key("title"));
    assert!(errors.contains_key("description"));
    assert!(validate_full(&full_form()).is_empty());
}

#[test]
fn salary_is_optional_throughout() {
    let form = JobForm { salary: None, ..full_form() };
    assert!(validate_full(&form).is_empty());
}

// =============================================================================
// advance / back
// =============================================================================

#[test]
fn advance_moves_forward_when_step_is_valid() {
    let state = WizardState { step: FIRST_STEP, form: basics_form() };
    let next = advance(state).unwrap();
    assert_eq!(next.step, 2);
}

#[test]
fn advance_rejects_invalid_step_with_field_errors() {
    let state = WizardState { step: FIRST_STEP, form: JobForm::default() };
    let errors = advance(state).unwrap_err();
    assert!(errors.contains_key("title"));
}

#[test]
fn advance_clamps_at_last_step() {
    let state = WizardState { step: LAST_STEP, form: full_form() };
    let next = advance(state).unwrap();
    assert_eq!(next.step, LAST_STEP);
}

#[test]
fn back_retains_previously_entered_fields() {
    // Fields entered on step 2 survive navigating back to step 1.
    let state = WizardState { step: 2, form: full_form() };
    let previous = back(state);
    assert_eq!(previous.step, FIRST_STEP);
    assert_eq!(previous.form, full_form());
    assert_eq!(previous.form.description, "Supervision de projets de reforestation");
}

#[test]
fn back_clamps_at_first_step() {
    let state = WizardState { step: FIRST_STEP, form: basics_form() };
    let previous = back(state);
    assert_eq!(previous.step, FIRST_STEP);
    assert_eq!(previous.form, basics_form());
}

#[test]
fn advance_keeps_accumulated_fields() {
    let state = WizardState { step: FIRST_STEP, form: full_form() };
    let next = advance(state).unwrap();
    assert_eq!(next.form, full_form());
}

// =============================================================================
// WizardState serde
// =============================================================================

#[test]
fn wizard_state_round_trips_through_json() {
    let state = WizardState { step: 2, form: full_form() };
    let json = serde_json::to_string(&state).unwrap();
    let restored: WizardState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.step, 2);
    assert_eq!(restored.form, full_form());
}

#[test]
fn default_state_starts_at_step_one() {
    let state = WizardState::default();
    assert_eq!(state.step, FIRST_STEP);
    assert_eq!(state.form, JobForm::default());
}
