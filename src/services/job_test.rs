use super::*;

fn job(title: &str, company: &str, job_type: JobType, status: JobStatus) -> JobRow {
    JobRow {
        id: Uuid::new_v4(),
        title: title.into(),
        company: company.into(),
        location: "Tunis".into(),
        job_type: job_type.as_str().into(),
        description: "Gestion durable des forêts".into(),
        requirements: "Expérience terrain".into(),
        salary: None,
        status: status.as_str().into(),
        views: 0,
        applications: 0,
        posted_by: None,
        posted_at: "2026-08-01".into(),
    }
}

// =============================================================================
// JobType / JobStatus
// =============================================================================

#[test]
fn job_type_parse_round_trips() {
    for t in [JobType::FullTime, JobType::PartTime, JobType::Contract, JobType::Internship] {
        assert_eq!(JobType::parse(t.as_str()), Some(t));
    }
}

#[test]
fn job_type_parse_rejects_unknown() {
    assert_eq!(JobType::parse("freelance"), None);
    assert_eq!(JobType::parse(""), None);
}

#[test]
fn job_type_serializes_kebab_case() {
    assert_eq!(serde_json::to_string(&JobType::FullTime).unwrap(), "\"full-time\"");
    assert_eq!(serde_json::to_string(&JobType::Internship).unwrap(), "\"internship\"");
}

#[test]
fn job_status_toggles() {
    assert_eq!(JobStatus::Active.toggled(), JobStatus::Inactive);
    assert_eq!(JobStatus::Inactive.toggled(), JobStatus::Active);
}

#[test]
fn job_status_parse_round_trips() {
    for s in [JobStatus::Active, JobStatus::Inactive] {
        assert_eq!(JobStatus::parse(s.as_str()), Some(s));
    }
}

// =============================================================================
// matches_search — public search page
// =============================================================================

#[test]
fn empty_filter_matches_everything() {
    let j = job("Technicien Forestier", "ONF", JobType::FullTime, JobStatus::Active);
    assert!(matches_search(&j, &SearchFilter::default()));
}

#[test]
fn search_term_matches_title_company_description() {
    let j = job("Ingénieur Forestier", "EcoForest", JobType::FullTime, JobStatus::Active);

    let by_title = SearchFilter { search: "ingénieur".into(), ..SearchFilter::default() };
    assert!(matches_search(&j, &by_title));

    let by_company = SearchFilter { search: "ecoforest".into(), ..SearchFilter::default() };
    assert!(matches_search(&j, &by_company));

    let by_description = SearchFilter { search: "durable".into(), ..SearchFilter::default() };
    assert!(matches_search(&j, &by_description));

    let no_match = SearchFilter { search: "plombier".into(), ..SearchFilter::default() };
    assert!(!matches_search(&j, &no_match));
}

#[test]
fn location_filter_is_substring_case_insensitive() {
    let j = job("Technicien", "ONF", JobType::FullTime, JobStatus::Active);
    let f = SearchFilter { location: "TUNIS".into(), ..SearchFilter::default() };
    assert!(matches_search(&j, &f));

    let f = SearchFilter { location: "Sfax".into(), ..SearchFilter::default() };
    assert!(!matches_search(&j, &f));
}

#[test]
fn type_set_accepts_any_selected_type() {
    let j = job("Stagiaire", "INRGREF", JobType::Internship, JobStatus::Active);
    let f = SearchFilter {
        types: vec![JobType::Contract, JobType::Internship],
        ..SearchFilter::default()
    };
    assert!(matches_search(&j, &f));

    let f = SearchFilter { types: vec![JobType::FullTime], ..SearchFilter::default() };
    assert!(!matches_search(&j, &f));
}

// =============================================================================
// filter_admin_jobs — admin table
// =============================================================================

#[test]
fn admin_filter_conjunction_of_status_and_type() {
    let jobs = vec![
        job("Stage actif", "A", JobType::Internship, JobStatus::Active),
        job("Stage inactif", "B", JobType::Internship, JobStatus::Inactive),
        job("CDI actif", "C", JobType::FullTime, JobStatus::Active),
    ];

    let filter = AdminJobFilter {
        search: String::new(),
        status: Some(JobStatus::Active),
        job_type: Some(JobType::Internship),
    };
    let filtered = filter_admin_jobs(jobs, &filter);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "Stage actif");
}

#[test]
fn admin_filter_none_selections_match_all() {
    let jobs = vec![
        job("A", "A", JobType::FullTime, JobStatus::Active),
        job("B", "B", JobType::Contract, JobStatus::Inactive),
    ];
    let filtered = filter_admin_jobs(jobs, &AdminJobFilter::default());
    assert_eq!(filtered.len(), 2);
}

#[test]
fn admin_filter_search_covers_title_and_company_only() {
    let j = job("Garde Forestier", "Direction des Forêts", JobType::FullTime, JobStatus::Active);

    let by_company = AdminJobFilter { search: "direction".into(), ..AdminJobFilter::default() };
    assert!(matches_admin_filter(&j, &by_company));

    // Unlike the public search, the description is not searched.
    let by_description = AdminJobFilter { search: "durable".into(), ..AdminJobFilter::default() };
    assert!(!matches_admin_filter(&j, &by_description));
}

// =============================================================================
// filter_jobs
// =============================================================================

#[test]
fn filter_jobs_preserves_order() {
    let jobs = vec![
        job("Premier", "A", JobType::FullTime, JobStatus::Active),
        job("Deuxième", "B", JobType::Contract, JobStatus::Active),
        job("Troisième", "C", JobType::FullTime, JobStatus::Active),
    ];
    let f = SearchFilter { types: vec![JobType::FullTime], ..SearchFilter::default() };
    let filtered = filter_jobs(jobs, &f);
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].title, "Premier");
    assert_eq!(filtered[1].title, "Troisième");
}

// =============================================================================
// JobForm
// =============================================================================

#[test]
fn job_form_default_is_full_time_and_empty() {
    let form = JobForm::default();
    assert_eq!(form.job_type, JobType::FullTime);
    assert!(form.title.is_empty());
    assert!(form.salary.is_none());
}

#[test]
fn job_form_deserializes_with_missing_optional_fields() {
    let form: JobForm = serde_json::from_str(r#"{"job_type":"internship"}"#).unwrap();
    assert_eq!(form.job_type, JobType::Internship);
    assert!(form.title.is_empty());
    assert!(form.salary.is_none());
}
