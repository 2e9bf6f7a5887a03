//! Comprehensive unit tests for validation.rs module

use payment_tracker_rust::validation::{InputValidator, VALID_SYNC_FREQUENCIES};
use std::path::Path;

#[test]
fn test_validate_payment_id_valid() {
    assert!(InputValidator::validate_payment_id(1).is_ok());
}

#[test]
fn test_validate_payment_id_large() {
    assert!(InputValidator::validate_payment_id(i64::MAX).is_ok());
}

#[test]
fn test_validate_payment_id_zero() {
    assert!(InputValidator::validate_payment_id(0).is_err());
}

#[test]
fn test_validate_payment_id_negative() {
    assert!(InputValidator::validate_payment_id(-5).is_err());
}

#[test]
fn test_validate_contact_id_valid() {
    assert!(InputValidator::validate_contact_id(3).is_ok());
}

#[test]
fn test_validate_contact_id_zero() {
    assert!(InputValidator::validate_contact_id(0).is_err());
}

#[test]
fn test_validate_contact_id_negative() {
    assert!(InputValidator::validate_contact_id(-1).is_err());
}

#[test]
fn test_validate_project_name_valid() {
    assert!(InputValidator::validate_project_name("Acme Tower").is_ok());
}

#[test]
fn test_validate_project_name_empty() {
    assert!(InputValidator::validate_project_name("").is_err());
}

#[test]
fn test_validate_project_name_whitespace_only() {
    assert!(InputValidator::validate_project_name("   ").is_err());
}

#[test]
fn test_validate_project_name_too_long() {
    let long_name = "a".repeat(201);
    assert!(InputValidator::validate_project_name(&long_name).is_err());
}

#[test]
fn test_validate_project_name_exactly_200_chars() {
    let name = "a".repeat(200);
    assert!(InputValidator::validate_project_name(&name).is_ok());
}

#[test]
fn test_validate_project_name_with_null_byte() {
    assert!(InputValidator::validate_project_name("Acme\0Tower").is_err());
}

#[test]
fn test_validate_project_name_with_newline() {
    assert!(InputValidator::validate_project_name("Acme\nTower").is_err());
}

#[test]
fn test_validate_project_name_with_carriage_return() {
    assert!(InputValidator::validate_project_name("Acme\rTower").is_err());
}

#[test]
fn test_validate_project_name_with_special_chars() {
    assert!(InputValidator::validate_project_name("Harbor Bridge - Phase 2").is_ok());
}

#[test]
fn test_validate_project_name_unicode() {
    assert!(InputValidator::validate_project_name("Torre São Paulo").is_ok());
}

#[test]
fn test_validate_search_query_valid() {
    assert!(InputValidator::validate_search_query("foundation").is_ok());
}

#[test]
fn test_validate_search_query_empty() {
    assert!(InputValidator::validate_search_query("").is_ok());
}

#[test]
fn test_validate_search_query_too_long() {
    let long_query = "q".repeat(201);
    assert!(InputValidator::validate_search_query(&long_query).is_err());
}

#[test]
fn test_validate_search_query_exactly_200_chars() {
    let query = "q".repeat(200);
    assert!(InputValidator::validate_search_query(&query).is_ok());
}

#[test]
fn test_validate_search_query_with_control_chars() {
    assert!(InputValidator::validate_search_query("inv\x00oice").is_err());
}

#[test]
fn test_validate_search_query_with_newline() {
    assert!(InputValidator::validate_search_query("invoice\n").is_err());
}

#[test]
fn test_validate_sheets_url_valid_https() {
    assert!(
        InputValidator::validate_sheets_url("https://docs.google.com/spreadsheets/d/abc123")
            .is_ok()
    );
}

#[test]
fn test_validate_sheets_url_valid_http() {
    assert!(InputValidator::validate_sheets_url("http://example.com/sheet").is_ok());
}

#[test]
fn test_validate_sheets_url_empty() {
    assert!(InputValidator::validate_sheets_url("").is_err());
}

#[test]
fn test_validate_sheets_url_whitespace_only() {
    assert!(InputValidator::validate_sheets_url("   ").is_err());
}

#[test]
fn test_validate_sheets_url_no_scheme() {
    assert!(InputValidator::validate_sheets_url("docs.google.com/spreadsheets").is_err());
}

#[test]
fn test_validate_sheets_url_wrong_scheme() {
    assert!(InputValidator::validate_sheets_url("ftp://example.com/sheet").is_err());
}

#[test]
fn test_validate_sheets_url_too_long() {
    let long_url = format!("https://example.com/{}", "a".repeat(2000));
    assert!(InputValidator::validate_sheets_url(&long_url).is_err());
}

#[test]
fn test_validate_sync_frequency_all_valid_tokens() {
    for frequency in VALID_SYNC_FREQUENCIES {
        assert!(
            InputValidator::validate_sync_frequency(frequency).is_ok(),
            "Failed for frequency: {}",
            frequency
        );
    }
}

#[test]
fn test_validate_sync_frequency_invalid() {
    assert!(InputValidator::validate_sync_frequency("yearly").is_err());
}

#[test]
fn test_validate_sync_frequency_empty() {
    assert!(InputValidator::validate_sync_frequency("").is_err());
}

#[test]
fn test_validate_sync_frequency_case_sensitive() {
    assert!(InputValidator::validate_sync_frequency("Daily").is_err());
}

#[test]
fn test_validate_file_path_valid() {
    let path = Path::new("output/report.txt");
    assert!(InputValidator::validate_file_path(path).is_ok());
}

#[test]
fn test_validate_file_path_empty() {
    let path = Path::new("");
    assert!(InputValidator::validate_file_path(path).is_err());
}

#[test]
fn test_validate_file_path_with_parent_traversal() {
    let path = Path::new("../output/report.txt");
    assert!(InputValidator::validate_file_path(path).is_err());
}

#[test]
fn test_validate_file_path_with_tilde() {
    let path = Path::new("~/output/report.txt");
    assert!(InputValidator::validate_file_path(path).is_err());
}

#[test]
fn test_validate_file_path_absolute() {
    let path = Path::new("/absolute/path/report.txt");
    assert!(InputValidator::validate_file_path(path).is_ok());
}

#[test]
fn test_validate_file_path_too_long() {
    let long_path = "a".repeat(5000);
    let path = Path::new(&long_path);
    assert!(InputValidator::validate_file_path(path).is_err());
}

#[test]
fn test_validate_backup_path_missing_file() {
    let path = Path::new("/nonexistent/backup.json");
    assert!(InputValidator::validate_backup_path(path).is_err());
}

#[test]
fn test_validate_backup_path_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(InputValidator::validate_backup_path(dir.path()).is_err());
}

#[test]
fn test_validate_backup_path_existing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("backup.json");
    std::fs::write(&file_path, "{}").expect("write file");
    assert!(InputValidator::validate_backup_path(&file_path).is_ok());
}

#[test]
fn test_sanitize_text_clean() {
    let text = "Clean text";
    let sanitized = InputValidator::sanitize_text(text);
    assert_eq!(sanitized, "Clean text");
}

#[test]
fn test_sanitize_text_with_control_chars() {
    let text = "Text\x00with\x01control";
    let sanitized = InputValidator::sanitize_text(text);
    assert!(!sanitized.contains('\x00'));
    assert!(!sanitized.contains('\x01'));
}

#[test]
fn test_sanitize_text_preserves_newlines() {
    let text = "Line1\nLine2";
    let sanitized = InputValidator::sanitize_text(text);
    assert!(sanitized.contains('\n'));
}

#[test]
fn test_sanitize_text_preserves_tabs() {
    let text = "Col1\tCol2";
    let sanitized = InputValidator::sanitize_text(text);
    assert!(sanitized.contains('\t'));
}

#[test]
fn test_sanitize_text_trims_whitespace() {
    let text = "  Text with spaces  ";
    let sanitized = InputValidator::sanitize_text(text);
    assert_eq!(sanitized, "Text with spaces");
}

#[test]
fn test_sanitize_text_empty() {
    let sanitized = InputValidator::sanitize_text("");
    assert_eq!(sanitized, "");
}

#[test]
fn test_sanitize_text_preserves_unicode() {
    let text = "Café — Müller";
    let sanitized = InputValidator::sanitize_text(text);
    assert_eq!(sanitized, "Café — Müller");
}
