//! Aggregation and lookup over the payment collection.
//!
//! Every function here is pure: it reads a slice of payments or contacts
//! and derives stats, filtered lists, groupings, or lookups without touching
//! the store. The service layer loads data once and feeds it through these.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::models::{
    Contact, ContactLinks, ContactRole, DashboardStats, Payment, PaymentFilter, PaymentStatus,
    ProjectSummary,
};

/// How many late payments the dashboard's recent-activity list shows.
pub const RECENT_LATE_LIMIT: usize = 5;

/// Compute dashboard statistics in a single pass.
///
/// Late and pending buckets sum `amountOwed`; the paid bucket sums
/// `amountPaidUSD`. `total_owed` covers every payment regardless of status,
/// so payments with an unrecognized status still count toward it while
/// landing in no bucket.
///
/// # Arguments
///
/// * `payments` - All payment milestones
///
/// # Returns
///
/// Aggregated counts and amounts for the dashboard.
#[must_use]
pub fn dashboard_stats(payments: &[Payment]) -> DashboardStats {
    let mut stats = DashboardStats::default();

    for payment in payments {
        match payment.status {
            PaymentStatus::Late => {
                stats.late_count += 1;
                stats.late_amount += payment.amount_owed;
            }
            PaymentStatus::NotDueYet => {
                stats.pending_count += 1;
                stats.pending_amount += payment.amount_owed;
            }
            PaymentStatus::Paid => {
                stats.paid_count += 1;
                stats.paid_amount += payment.amount_paid_usd;
            }
            PaymentStatus::Other(_) => {}
        }
        stats.total_owed += payment.amount_owed;
    }

    stats
}

/// Filter payments by status and project; both halves must match.
#[must_use]
pub fn filter_payments<'a>(payments: &'a [Payment], filter: &PaymentFilter) -> Vec<&'a Payment> {
    payments
        .iter()
        .filter(|payment| filter.status.matches(&payment.status))
        .filter(|payment| match &filter.project {
            Some(project) => payment.project_name == *project,
            None => true,
        })
        .collect()
}

/// Case-insensitive substring search over description, project name, and
/// invoice number. An empty query keeps everything.
#[must_use]
pub fn search_payments<'a>(payments: &'a [Payment], query: &str) -> Vec<&'a Payment> {
    if query.is_empty() {
        return payments.iter().collect();
    }

    let needle = query.to_lowercase();
    payments
        .iter()
        .filter(|payment| {
            payment.description.to_lowercase().contains(&needle)
                || payment.project_name.to_lowercase().contains(&needle)
                || payment
                    .invoice_number
                    .as_ref()
                    .is_some_and(|invoice| invoice.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Case-insensitive substring search over project name, company, and the
/// finance manager's name. An empty query keeps everything.
#[must_use]
pub fn search_contacts<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    if query.is_empty() {
        return contacts.iter().collect();
    }

    let needle = query.to_lowercase();
    contacts
        .iter()
        .filter(|contact| {
            contact.project_name.to_lowercase().contains(&needle)
                || contact.company.to_lowercase().contains(&needle)
                || contact
                    .finance_manager
                    .name
                    .as_ref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Total order on due dates: earlier dates first, undated payments last.
///
/// Undated payments compare equal to each other, so sorting with this
/// comparator is stable and keeps their stored order.
#[must_use]
pub fn compare_due_dates(a: &Payment, b: &Payment) -> Ordering {
    match (a.due_date, b.due_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => left.cmp(&right),
    }
}

/// Sort payments ascending by due date, undated last, otherwise stable.
pub fn sort_by_due_date(payments: &mut [Payment]) {
    payments.sort_by(compare_due_dates);
}

/// Group payments by project name, preserving first-appearance order.
///
/// # Arguments
///
/// * `payments` - All payment milestones
///
/// # Returns
///
/// One summary per distinct project, in the order projects first occur in
/// the input. Summaries are derived on demand and never persisted.
#[must_use]
pub fn group_by_project(payments: &[Payment]) -> Vec<ProjectSummary> {
    let mut summaries: Vec<ProjectSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for payment in payments {
        let slot = match index.get(payment.project_name.as_str()) {
            Some(&slot) => slot,
            None => {
                index.insert(payment.project_name.as_str(), summaries.len());
                summaries.push(ProjectSummary {
                    name: payment.project_name.clone(),
                    count: 0,
                    total_owed: 0.0,
                    total_paid: 0.0,
                    late_count: 0,
                });
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[slot];
        summary.count += 1;
        summary.total_owed += payment.amount_owed;
        summary.total_paid += payment.amount_paid_usd;
        if payment.status.is_late() {
            summary.late_count += 1;
        }
    }

    summaries
}

/// Distinct project names in ascending order.
#[must_use]
pub fn distinct_projects(payments: &[Payment]) -> Vec<String> {
    payments
        .iter()
        .map(|payment| payment.project_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Find the contact sheet for a project.
///
/// Tries an exact `projectName` match first. Failing that, takes the first
/// whitespace-separated word of the project name and looks for it,
/// case-insensitively, inside each contact's project name; the first match
/// in stored order wins. A blank project name matches nothing.
#[must_use]
pub fn find_contact_for_project<'a>(
    contacts: &'a [Contact],
    project_name: &str,
) -> Option<&'a Contact> {
    if let Some(exact) = contacts.iter().find(|c| c.project_name == project_name) {
        return Some(exact);
    }

    let first_word = project_name.split_whitespace().next()?.to_lowercase();
    contacts
        .iter()
        .find(|c| c.project_name.to_lowercase().contains(&first_word))
}

/// Late payments ordered by due date, capped at [`RECENT_LATE_LIMIT`].
#[must_use]
pub fn recent_late_payments(payments: &[Payment]) -> Vec<&Payment> {
    let mut late: Vec<&Payment> = payments.iter().filter(|p| p.status.is_late()).collect();
    late.sort_by(|a, b| compare_due_dates(a, b));
    late.truncate(RECENT_LATE_LIMIT);
    late
}

/// Whole days a payment is past due as of `today`; never negative, and zero
/// for undated payments.
#[must_use]
pub fn days_overdue(payment: &Payment, today: NaiveDate) -> i64 {
    match payment.due_date {
        Some(due) => (today - due).num_days().max(0),
        None => 0,
    }
}

/// Deep links for reaching a contact role. Blank or missing fields produce
/// no link; the WhatsApp link keeps only the digits of the phone number.
#[must_use]
pub fn contact_links(role: &ContactRole) -> ContactLinks {
    let phone = role.phone.as_deref().filter(|p| !p.is_empty());
    let email = role.email.as_deref().filter(|e| !e.is_empty());

    ContactLinks {
        call: phone.map(|p| format!("tel:{p}")),
        email: email.map(|e| format!("mailto:{e}")),
        whatsapp: phone.map(|p| {
            let digits: String = p.chars().filter(char::is_ascii_digit).collect();
            format!("https://wa.me/{digits}")
        }),
    }
}

/// Format an amount as whole dollars with thousands separators, e.g.
/// `$1,234`. Rounding is half-up to match how the dataset has always been
/// displayed.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let rounded = (amount + 0.5).floor() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${sign}{grouped}")
}

/// Format a date as `Jan 5, 2024`, or `N/A` when absent.
#[must_use]
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "N/A".to_owned(),
    }
}
