//! Job-posting wizard — three steps of client-held form state.
//!
//! DESIGN
//! ======
//! The wizard never persists drafts: the client carries the full
//! accumulated `JobForm` plus a step index and round-trips it through
//! the step endpoint, so navigating back keeps every previously entered
//! field. Each forward transition validates only the fields the current
//! step collects; the final submit re-validates everything.

use crate::services::auth::FieldErrors;
use crate::services::job::JobForm;

/// Step 1: basics, step 2: description, step 3: review + submit.
pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 3;

/// Client-held wizard state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WizardState {
    pub step: u8,
    pub form: JobForm,
}

impl Default for WizardState {
    fn default() -> Self {
        Self { step: FIRST_STEP, form: JobForm::default() }
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message.to_owned());
    }
}

/// Validate the fields collected by a single step. Empty map means valid.
/// Steps outside `1..=3` validate nothing.
#[must_use]
pub fn validate_step(step: u8, form: &JobForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match step {
        FIRST_STEP => {
            require(&mut errors, "title", &form.title, "Le titre du poste est requis");
            require(&mut errors, "company", &form.company, "L'entreprise est requise");
            require(&mut errors, "location", &form.location, "La localisation est requise");
        }
        2 => {
            require(&mut errors, "description", &form.description, "La description du poste est requise");
            require(&mut errors, "requirements", &form.requirements, "Les prérequis sont requis");
        }
        _ => {}
    }
    errors
}

/// Validate the whole form, as the final submit does.
#[must_use]
pub fn validate_full(form: &JobForm) -> FieldErrors {
    let mut errors = validate_step(FIRST_STEP, form);
    errors.extend(validate_step(2, form));
    errors
}

/// Advance to the next step if the current one validates.
///
/// # Errors
///
/// Returns the per-field messages of the current step when invalid; the
/// state is returned unchanged inside the error path by the caller.
pub fn advance(state: WizardState) -> Result<WizardState, FieldErrors> {
    let errors = validate_step(state.step, &state.form);
    if !errors.is_empty() {
        return Err(errors);
    }
    let step = state.step.saturating_add(1).min(LAST_STEP);
    Ok(WizardState { step, form: state.form })
}

/// Go back one step. Accumulated fields are kept untouched, so values
/// entered on later steps survive the round trip.
#[must_use]
pub fn back(state: WizardState) -> WizardState {
    let step = state.step.saturating_sub(1).max(FIRST_STEP);
    WizardState { step, form: state.form }
}

#[cfg(test)]
#[path = "wizard_test.rs"]
mod tests;
