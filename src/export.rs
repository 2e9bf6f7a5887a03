//! Backup export and import.
//!
//! A backup is one JSON document holding both collections plus the moment
//! it was written, pretty-printed so it stays diffable and hand-editable.
//! Import is all-or-nothing: a file missing either collection is rejected
//! and the stored data is left untouched.

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, TrackerError};
use crate::models::{Contact, Payment};
use crate::schema::export as layout;

/// The backup document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// All payment milestones
    pub payments: Vec<Payment>,
    /// All contact sheets
    pub contacts: Vec<Contact>,
    /// RFC 3339 timestamp of when the backup was written
    pub export_date: String,
}

impl BackupDocument {
    /// Assemble a backup of the given collections, stamped with the
    /// current time.
    #[must_use]
    pub fn new(payments: Vec<Payment>, contacts: Vec<Contact>) -> Self {
        Self {
            payments,
            contacts,
            export_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Relaxed shape used to check a backup before accepting it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBackup {
    #[serde(default)]
    payments: Option<Vec<Payment>>,
    #[serde(default)]
    contacts: Option<Vec<Contact>>,
}

/// File name for a backup written on the given date, e.g.
/// `payment-tracker-export-2026-08-23.json`.
#[must_use]
pub fn backup_file_name(date: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        layout::FILE_PREFIX,
        date.format("%Y-%m-%d"),
        layout::FILE_EXTENSION
    )
}

/// Parse and validate backup JSON.
///
/// # Errors
///
/// Returns [`TrackerError::Serialization`] for malformed JSON and
/// [`TrackerError::InvalidBackup`] when either collection is missing or
/// null; empty collections are accepted.
pub fn parse_backup(raw: &str) -> Result<(Vec<Payment>, Vec<Contact>)> {
    let parsed: RawBackup = serde_json::from_str(raw)?;
    let payments = parsed
        .payments
        .ok_or_else(|| TrackerError::InvalidBackup("missing payments section".to_owned()))?;
    let contacts = parsed
        .contacts
        .ok_or_else(|| TrackerError::InvalidBackup("missing contacts section".to_owned()))?;
    Ok((payments, contacts))
}

/// Write a backup document into `output_dir`, dated `date`.
///
/// # Arguments
///
/// * `document` - The backup to write
/// * `output_dir` - Directory for the file; created if absent
/// * `date` - Date stamped into the file name
///
/// # Returns
///
/// Path of the file written.
pub async fn write_backup(
    document: &BackupDocument,
    output_dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await?;

    let path = output_dir.join(backup_file_name(date));
    let json = serde_json::to_string_pretty(document)?;
    tokio::fs::write(&path, json).await?;

    info!(
        path = %path.display(),
        payments = document.payments.len(),
        contacts = document.contacts.len(),
        "backup written"
    );
    Ok(path)
}

/// Read and validate a backup file.
pub async fn read_backup(path: &Path) -> Result<(Vec<Payment>, Vec<Contact>)> {
    let raw = tokio::fs::read_to_string(path).await?;
    parse_backup(&raw)
}
