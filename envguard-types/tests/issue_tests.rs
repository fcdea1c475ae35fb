use envguard_types::{FieldIssue, FlagIssue, ValidationErrors};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::BTreeMap;

// ── FieldIssue / FlagIssue ────────────────────────────────────────

#[test]
fn field_issue_display() {
    let issue = FieldIssue::new("PORT", "Required");
    assert_eq!(issue.to_string(), "PORT: Required");
}

#[test]
fn flag_issue_uses_fixed_message() {
    let issue = FlagIssue::undefined_dependent("FLAG", "VALUE");
    assert_eq!(issue.flag, "FLAG");
    assert_eq!(issue.dependent, "VALUE");
    assert_eq!(issue.message, "Expected non-undefined value, received undefined");
}

// ── ValidationErrors ──────────────────────────────────────────────

#[test]
fn field_errors_group_by_variable() {
    let errors = ValidationErrors::from(vec![
        FieldIssue::new("A", "too short"),
        FieldIssue::new("B", "Required"),
        FieldIssue::new("A", "not a url"),
    ]);

    let mut expected = BTreeMap::new();
    expected.insert("A".to_string(), vec!["too short".to_string(), "not a url".to_string()]);
    expected.insert("B".to_string(), vec!["Required".to_string()]);
    assert_eq!(errors.field_errors(), expected);
    assert_eq!(errors.len(), 3);
    assert!(errors.contains("B"));
    assert!(!errors.contains("C"));
}

#[test]
fn display_lists_every_variable() {
    let errors = ValidationErrors::from(vec![
        FieldIssue::new("B", "Required"),
        FieldIssue::new("A", "bad"),
    ]);
    assert_eq!(errors.to_string(), "A: bad; B: Required");
}

#[test]
fn empty_errors() {
    let errors = ValidationErrors::new();
    assert!(errors.is_empty());
    assert_eq!(errors.to_string(), "");
}

proptest! {
    /// Every pushed issue is kept; nothing is deduplicated.
    #[test]
    fn push_keeps_all_issues(names in prop::collection::vec("[A-Z]{1,6}", 0..20)) {
        let mut errors = ValidationErrors::new();
        for name in &names {
            errors.push(FieldIssue::new(name.clone(), "bad"));
        }
        prop_assert_eq!(errors.len(), names.len());
        let total: usize = errors.field_errors().values().map(Vec::len).sum();
        prop_assert_eq!(total, names.len());
    }
}
