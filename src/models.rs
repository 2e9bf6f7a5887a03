//! Data models for payments, contacts, and derived views
//!
//! This module contains all data structures used throughout the application,
//! including payment milestones, project contacts, and the derived
//! dashboard/project aggregates. Wire names match the original JSON dataset
//! (camelCase, `expectedPaymentUSD`-style suffixes), and decoding is lenient:
//! absent or malformed amounts become `0.0`, absent or malformed dates become
//! `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire string for a payment that is past due and unpaid.
pub const STATUS_LATE: &str = "Late — not paid";
/// Wire string for a payment that is not due yet.
pub const STATUS_NOT_DUE_YET: &str = "Not due yet";
/// Wire string for a settled payment.
pub const STATUS_PAID: &str = "Paid";

/// Date format used by all payment date fields (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Payment lifecycle status.
///
/// The three known statuses drive every aggregate bucket. Anything else on
/// the wire is preserved verbatim in [`PaymentStatus::Other`] so an
/// import/export round-trip does not rewrite data; `Other` payments appear
/// in unfiltered lists but contribute to no stat bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    /// Past the due date without full payment recorded
    Late,
    /// Pending, not yet due
    NotDueYet,
    /// Fully paid
    Paid,
    /// Unrecognized wire value, kept as-is
    Other(String),
}

impl Default for PaymentStatus {
    fn default() -> Self {
        // A payment with no status belongs to no bucket.
        Self::Other(String::new())
    }
}

impl From<String> for PaymentStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            STATUS_LATE => Self::Late,
            STATUS_NOT_DUE_YET => Self::NotDueYet,
            STATUS_PAID => Self::Paid,
            _ => Self::Other(raw),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl PaymentStatus {
    /// Wire representation of this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Late => STATUS_LATE,
            Self::NotDueYet => STATUS_NOT_DUE_YET,
            Self::Paid => STATUS_PAID,
            Self::Other(raw) => raw,
        }
    }

    /// True for [`PaymentStatus::Late`].
    #[must_use]
    pub const fn is_late(&self) -> bool {
        matches!(self, Self::Late)
    }

    /// True for [`PaymentStatus::Paid`].
    #[must_use]
    pub const fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment milestone for a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique, stable identifier
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    /// Short description of the milestone
    #[serde(default)]
    pub description: String,
    /// Name of the project this payment belongs to
    #[serde(default)]
    pub project_name: String,
    /// Milestone sequence number, when the project uses them
    #[serde(default, deserialize_with = "lenient_milestone")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_number: Option<u32>,
    /// Payment status (unrecognized values are kept verbatim)
    #[serde(default)]
    pub status: PaymentStatus,
    /// Date the payment is due
    #[serde(default, with = "wire_date")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Date the invoice was issued
    #[serde(default, with = "wire_date")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<NaiveDate>,
    /// Date payment was received
    #[serde(default, with = "wire_date")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Invoice reference number
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// Expected payment amount in USD
    #[serde(rename = "expectedPaymentUSD")]
    #[serde(default, deserialize_with = "lenient_amount")]
    pub expected_payment_usd: f64,
    /// Amount actually received in USD
    #[serde(rename = "amountPaidUSD")]
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount_paid_usd: f64,
    /// Outstanding amount in USD. Stored independently of
    /// `expectedPaymentUSD - amountPaidUSD`; the two are never reconciled.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount_owed: f64,
    /// Free-form notes
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One named role on a project contact sheet (finance, project, or
/// consultant manager). Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRole {
    /// Person's name
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phone number, as entered
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Email address
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Contact sheet for a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique, stable identifier
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    /// Project name this contact sheet is attached to
    #[serde(default)]
    pub project_name: String,
    /// Company name
    #[serde(default)]
    pub company: String,
    /// Division within the company
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    /// Finance manager role
    #[serde(default)]
    pub finance_manager: ContactRole,
    /// Project manager role
    #[serde(default)]
    pub project_manager: ContactRole,
    /// Consultant manager role
    #[serde(default)]
    pub consultant_manager: ContactRole,
}

/// Dashboard statistics over the whole payment collection.
///
/// `late_amount` and `pending_amount` sum `amountOwed` for their bucket,
/// while `paid_amount` sums `amountPaidUSD` over paid items; `total_owed`
/// sums `amountOwed` across every payment regardless of status. The
/// owed-vs-paid asymmetry is how the dataset has always been read and is
/// kept as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of late payments
    pub late_count: usize,
    /// Sum of `amountOwed` over late payments
    pub late_amount: f64,
    /// Number of pending (not due yet) payments
    pub pending_count: usize,
    /// Sum of `amountOwed` over pending payments
    pub pending_amount: f64,
    /// Number of paid payments
    pub paid_count: usize,
    /// Sum of `amountPaidUSD` over paid payments
    pub paid_amount: f64,
    /// Sum of `amountOwed` over all payments, any status
    pub total_owed: f64,
}

/// Per-project aggregate derived by grouping payments on `projectName`.
/// Never persisted; recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    /// Project name (grouping key)
    pub name: String,
    /// Number of payment milestones in the project
    pub count: usize,
    /// Sum of `amountOwed` over the project's payments
    pub total_owed: f64,
    /// Sum of `amountPaidUSD` over the project's payments
    pub total_paid: f64,
    /// Number of late milestones in the project
    pub late_count: usize,
}

/// Status half of a payment list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No status filtering
    #[default]
    All,
    /// Keep only payments with exactly this status
    Only(PaymentStatus),
}

impl StatusFilter {
    /// Parse a user-supplied filter argument.
    ///
    /// Accepts the short tokens `all`, `late`, `pending`, `paid`
    /// (case-insensitive) as well as the exact wire strings.
    #[must_use]
    pub fn parse_arg(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        if trimmed.eq_ignore_ascii_case("late") || trimmed == STATUS_LATE {
            return Some(Self::Only(PaymentStatus::Late));
        }
        if trimmed.eq_ignore_ascii_case("pending") || trimmed == STATUS_NOT_DUE_YET {
            return Some(Self::Only(PaymentStatus::NotDueYet));
        }
        if trimmed.eq_ignore_ascii_case("paid") || trimmed == STATUS_PAID {
            return Some(Self::Only(PaymentStatus::Paid));
        }
        None
    }

    /// True when this filter keeps the given status.
    #[must_use]
    pub fn matches(&self, status: &PaymentStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// Combined payment list filter; status and project apply as a logical AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentFilter {
    /// Status filter (`All` keeps everything)
    pub status: StatusFilter,
    /// Exact project name, or `None` for all projects
    pub project: Option<String>,
}

/// Spreadsheet sync settings, stored exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSettings {
    /// Spreadsheet URL, when configured
    pub sheets_url: Option<String>,
    /// Sync frequency token, when configured
    pub frequency: Option<String>,
}

/// Deep-link strings for reaching a contact role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLinks {
    /// `tel:` link, when the role has a phone number
    pub call: Option<String>,
    /// `mailto:` link, when the role has an email address
    pub email: Option<String>,
    /// WhatsApp link with the phone stripped to digits
    pub whatsapp: Option<String>,
}

/// Output format for report files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text format
    Txt,
    /// Comma-separated values format
    Csv,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Parse a user-supplied format argument (case-insensitive).
    #[must_use]
    pub fn parse_arg(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Deserialize an id that may arrive as a number or a numeric string.
fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Deserialize an amount, treating anything absent or malformed as zero.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Deserialize a milestone number that may arrive as a number or string.
fn lenient_milestone<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Serde codec for optional `YYYY-MM-DD` date fields.
///
/// Decoding is lenient: empty strings, non-strings and unparseable values
/// all become `None`. Timestamp strings keep their date prefix.
mod wire_date {
    use super::{NaiveDate, DATE_FORMAT};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) => super::parse_wire_date(&s),
            _ => None,
        })
    }
}

/// Parse a wire date string, tolerating timestamp suffixes.
#[must_use]
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_decodes_minimal_record() {
        let payment: Payment = serde_json::from_str(r#"{"id": 7}"#).expect("decodes");
        assert_eq!(payment.id, 7);
        assert_eq!(payment.status, PaymentStatus::Other(String::new()));
        assert!(payment.due_date.is_none());
        assert!(payment.milestone_number.is_none());
        assert!(payment.expected_payment_usd.abs() < f64::EPSILON);
    }

    #[test]
    fn test_payment_decodes_string_typed_numbers() {
        let raw = r#"{
            "id": "12",
            "milestoneNumber": "3",
            "expectedPaymentUSD": "18000.50",
            "amountOwed": " 250 "
        }"#;
        let payment: Payment = serde_json::from_str(raw).expect("decodes");
        assert_eq!(payment.id, 12);
        assert_eq!(payment.milestone_number, Some(3));
        assert!((payment.expected_payment_usd - 18000.5).abs() < f64::EPSILON);
        assert!((payment.amount_owed - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_payment_treats_malformed_numbers_as_zero() {
        let raw = r#"{"id": 1, "expectedPaymentUSD": "pending", "amountOwed": null}"#;
        let payment: Payment = serde_json::from_str(raw).expect("decodes");
        assert!(payment.expected_payment_usd.abs() < f64::EPSILON);
        assert!(payment.amount_owed.abs() < f64::EPSILON);
    }

    #[test]
    fn test_payment_decodes_dates_leniently() {
        let raw = r#"{
            "id": 1,
            "dueDate": "2026-03-05",
            "invoiceDate": "2026-02-01T00:00:00.000Z",
            "paymentDate": ""
        }"#;
        let payment: Payment = serde_json::from_str(raw).expect("decodes");
        assert_eq!(payment.due_date, NaiveDate::from_ymd_opt(2026, 3, 5));
        assert_eq!(payment.invoice_date, NaiveDate::from_ymd_opt(2026, 2, 1));
        assert!(payment.payment_date.is_none());
    }

    #[test]
    fn test_payment_ignores_unparseable_date() {
        let payment: Payment =
            serde_json::from_str(r#"{"id": 1, "dueDate": "next spring"}"#).expect("decodes");
        assert!(payment.due_date.is_none());
    }

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(
            PaymentStatus::from(STATUS_LATE.to_string()),
            PaymentStatus::Late
        );
        assert_eq!(
            PaymentStatus::from("Disputed".to_string()),
            PaymentStatus::Other("Disputed".to_string())
        );
        assert_eq!(PaymentStatus::Late.as_str(), STATUS_LATE);
    }

    #[test]
    fn test_status_filter_parses_short_tokens() {
        assert_eq!(StatusFilter::parse_arg("ALL"), Some(StatusFilter::All));
        assert_eq!(
            StatusFilter::parse_arg("late"),
            Some(StatusFilter::Only(PaymentStatus::Late))
        );
        assert_eq!(
            StatusFilter::parse_arg(STATUS_NOT_DUE_YET),
            Some(StatusFilter::Only(PaymentStatus::NotDueYet))
        );
        assert_eq!(StatusFilter::parse_arg("overdue"), None);
    }

    #[test]
    fn test_contact_decodes_with_missing_roles() {
        let raw = r#"{"id": 4, "projectName": "Acme Tower", "company": "Meridian"}"#;
        let contact: Contact = serde_json::from_str(raw).expect("decodes");
        assert_eq!(contact.id, 4);
        assert!(contact.finance_manager.name.is_none());
        assert!(contact.division.is_none());
    }
}
