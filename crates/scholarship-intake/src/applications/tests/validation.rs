use std::collections::BTreeSet;

use super::common::*;
use crate::applications::domain::{FieldValue, FormField};
use crate::applications::validation::{
    is_gpa_in_range, is_valid_email, is_valid_phone, is_valid_student_id, is_valid_url,
    validate_all,
};
use crate::applications::{validate, ValidationRule};

fn rule_for(field: FormField) -> Option<ValidationRule> {
    validate(&field).rule
}

#[test]
fn phone_numbers_need_leading_zero_and_ten_or_eleven_digits() {
    assert!(is_valid_phone("0123456789"));
    assert!(is_valid_phone("01234567890"));
    assert!(!is_valid_phone("123456789"));
    assert!(!is_valid_phone("012345678"));
    assert!(!is_valid_phone("01234567890123"));
    assert!(!is_valid_phone("0123 456 789"));
}

#[test]
fn student_ids_are_two_letters_then_four_to_eight_digits() {
    assert!(is_valid_student_id("AB1234"));
    assert!(is_valid_student_id("ab1234"));
    assert!(is_valid_student_id("Se12345678"));
    assert!(!is_valid_student_id("A1234"));
    assert!(!is_valid_student_id("AB123"));
    assert!(!is_valid_student_id("AB123456789"));
    assert!(!is_valid_student_id("ABC1234"));
}

#[test]
fn email_shape_requires_single_at_and_dotted_domain() {
    assert!(is_valid_email("an.nguyen@example.edu.vn"));
    assert!(!is_valid_email("an.nguyen@example"));
    assert!(!is_valid_email("an@nguyen@example.vn"));
    assert!(!is_valid_email("an nguyen@example.vn"));
    assert!(!is_valid_email("@example.vn"));
}

#[test]
fn urls_must_be_absolute() {
    assert!(is_valid_url("https://drive.google.com/file/d/abc"));
    assert!(is_valid_url("mailto:registrar@example.edu.vn"));
    assert!(!is_valid_url("drive.google.com/file"));
    assert!(!is_valid_url("/relative/path"));
}

#[test]
fn gpa_range_only_rejects_parsed_out_of_range_values() {
    assert!(is_gpa_in_range("0"));
    assert!(is_gpa_in_range("4.00"));
    assert!(is_gpa_in_range("3.75"));
    assert!(!is_gpa_in_range("4.01"));
    assert!(!is_gpa_in_range("-0.5"));
    assert!(is_gpa_in_range("excellent"));
}

#[test]
fn required_empty_fields_fail_for_every_kind() {
    let cases = vec![
        FormField::required("fullName", text("")),
        FormField::required("fullName", text("   ")),
        FormField::required("gpa", number("")),
        FormField::required("email", FieldValue::Email(String::new())),
        FormField::required("phone", FieldValue::Phone(String::new())),
        FormField::required("portfolio", FieldValue::Url(String::new())),
        FormField::required("situation", FieldValue::MultiChoice(BTreeSet::new())),
    ];

    for field in cases {
        let verdict = validate(&field);
        assert!(!verdict.valid, "{field:?} should fail");
        assert_eq!(verdict.rule, Some(ValidationRule::Required));
        assert_eq!(verdict.message, "Trường này là bắt buộc");
    }

    assert_eq!(
        rule_for(FormField::required("rank", FieldValue::SingleChoice(None))),
        Some(ValidationRule::ChoiceRequired)
    );
    assert_eq!(
        rule_for(FormField::required("agreement", FieldValue::Boolean(false))),
        Some(ValidationRule::Agreement)
    );
}

#[test]
fn optional_empty_fields_pass_format_checks() {
    let cases = vec![
        FormField::optional("email", FieldValue::Email(String::new())),
        FormField::optional("phone", FieldValue::Phone(String::new())),
        FormField::optional("studentId", text("")),
        FormField::optional("gpa", number("")),
        FormField::optional("portfolio", FieldValue::Url(String::new())),
        FormField::optional("rank", FieldValue::SingleChoice(None)),
        FormField::optional("agreement", FieldValue::Boolean(false)),
    ];

    for field in cases {
        assert!(validate(&field).valid, "{field:?} should pass");
    }
}

#[test]
fn required_check_wins_over_format_check() {
    let verdict = validate(&FormField::required("phone", FieldValue::Phone("  ".to_string())));
    assert_eq!(verdict.rule, Some(ValidationRule::Required));
}

#[test]
fn format_rules_fire_by_kind_and_by_name() {
    assert_eq!(
        rule_for(FormField::required("email", FieldValue::Email("nope".to_string()))),
        Some(ValidationRule::Email)
    );
    assert_eq!(
        rule_for(FormField::optional("phone", text("123456789"))),
        Some(ValidationRule::Phone)
    );
    assert_eq!(
        rule_for(FormField::optional("guardianPhone", FieldValue::Phone("98765".to_string()))),
        Some(ValidationRule::Phone)
    );
    assert_eq!(
        rule_for(FormField::required("studentId", text("A1234"))),
        Some(ValidationRule::StudentId)
    );
    assert_eq!(
        rule_for(FormField::required("gpa", number("4.5"))),
        Some(ValidationRule::GpaRange)
    );
    assert_eq!(
        rule_for(FormField::optional("portfolio", FieldValue::Url("not a url".to_string()))),
        Some(ValidationRule::Url)
    );
    assert_eq!(rule_for(FormField::required("gpa", number("abc"))), None);
}

#[test]
fn agreement_must_be_a_checked_box_whatever_its_kind() {
    assert_eq!(
        rule_for(FormField::required("agreement", text("yes"))),
        Some(ValidationRule::Agreement)
    );
    assert_eq!(
        rule_for(FormField::required("agreement", choice("true"))),
        Some(ValidationRule::Agreement)
    );
    assert_eq!(
        rule_for(FormField::required("agreement", FieldValue::Boolean(true))),
        None
    );
}

#[test]
fn non_agreement_checkboxes_never_fail_required() {
    let field = FormField::required("newsletter", FieldValue::Boolean(false));
    assert!(validate(&field).valid);
}

#[test]
fn every_rule_has_a_distinct_message() {
    let rules = [
        ValidationRule::Required,
        ValidationRule::ChoiceRequired,
        ValidationRule::Agreement,
        ValidationRule::Email,
        ValidationRule::Phone,
        ValidationRule::StudentId,
        ValidationRule::GpaRange,
        ValidationRule::Url,
    ];
    let messages: BTreeSet<&str> = rules.iter().map(|rule| rule.message()).collect();
    assert_eq!(messages.len(), rules.len());
}

#[test]
fn validate_all_reports_failures_in_field_order() {
    let mut fields = fields();
    fields[3].value = FieldValue::Phone("123".to_string());
    fields[4].value = number("9");

    let errors = validate_all(&fields);
    let names: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
    assert_eq!(names, vec!["phone", "gpa"]);
    assert_eq!(errors[0].rule, ValidationRule::Phone);
}

#[test]
fn sample_form_is_valid() {
    assert!(validate_all(&fields()).is_empty());
}
