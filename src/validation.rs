use anyhow::{anyhow, Result};
use std::path::Path;

/// Sync frequency tokens accepted by the settings.
pub const VALID_SYNC_FREQUENCIES: [&str; 4] = ["manual", "hourly", "daily", "weekly"];

/// Validation utilities for input sanitization and edge case handling
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate a payment id
    pub fn validate_payment_id(id: i64) -> Result<()> {
        if id <= 0 {
            return Err(anyhow!("Payment id must be positive"));
        }

        Ok(())
    }

    /// Validate a contact id
    pub fn validate_contact_id(id: i64) -> Result<()> {
        if id <= 0 {
            return Err(anyhow!("Contact id must be positive"));
        }

        Ok(())
    }

    /// Validate a project name given on the command line
    pub fn validate_project_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow!("Project name cannot be empty"));
        }

        if name.len() > 200 {
            return Err(anyhow!("Project name too long (max 200 characters)"));
        }

        // Project names are single-line
        if name.contains('\0') || name.contains('\r') || name.contains('\n') {
            return Err(anyhow!("Project name contains invalid characters"));
        }

        Ok(())
    }

    /// Validate a search query. Empty queries are fine; they match
    /// everything.
    pub fn validate_search_query(query: &str) -> Result<()> {
        if query.len() > 200 {
            return Err(anyhow!("Search query too long (max 200 characters)"));
        }

        if query.chars().any(char::is_control) {
            return Err(anyhow!("Search query contains invalid characters"));
        }

        Ok(())
    }

    /// Validate a spreadsheet sync URL
    pub fn validate_sheets_url(url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(anyhow!("Sheets URL cannot be empty"));
        }

        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(anyhow!("Sheets URL must start with http:// or https://"));
        }

        if url.len() > 2000 {
            return Err(anyhow!("Sheets URL too long (max 2000 characters)"));
        }

        Ok(())
    }

    /// Validate a sync frequency token
    pub fn validate_sync_frequency(frequency: &str) -> Result<()> {
        if !VALID_SYNC_FREQUENCIES.contains(&frequency) {
            return Err(anyhow!(
                "Invalid sync frequency: {}. Must be one of: {:?}",
                frequency,
                VALID_SYNC_FREQUENCIES
            ));
        }

        Ok(())
    }

    /// Validate an output path given on the command line
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let raw = path.to_string_lossy();
        if raw.is_empty() {
            return Err(anyhow!("File path cannot be empty"));
        }
        if raw.len() > 4096 {
            return Err(anyhow!("File path too long (max 4096 characters)"));
        }

        // No traversal or unexpanded home components
        if raw.contains("..") || raw.contains('~') {
            return Err(anyhow!("File path must not contain '..' or '~'"));
        }

        Ok(())
    }

    /// Validate a backup file before import
    pub fn validate_backup_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(anyhow!("Backup file does not exist: {path:?}"));
        }

        if !path.is_file() {
            return Err(anyhow!("Backup path is not a file: {path:?}"));
        }

        Ok(())
    }

    /// Strip control characters from free text, keeping line and tab
    /// whitespace, and trim the ends.
    #[must_use]
    pub fn sanitize_text(text: &str) -> String {
        let kept: String = text
            .chars()
            .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
            .collect();
        kept.trim().to_string()
    }
}
