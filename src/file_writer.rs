//! File writing utilities for payment reports.
//!
//! This module provides functions for writing payment lists to files in
//! various formats (TXT, CSV, JSON) with consistent formatting. The JSON
//! format is the raw wire shape; TXT and CSV render dates and (for TXT)
//! amounts the way the views do.

use crate::aggregate::{format_currency, format_date};
use crate::error::Result;
use crate::models::{OutputFormat, Payment};
use chrono::NaiveDate;
use csv::Writer;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name for a report written on the given date, e.g.
/// `payment-report-2026-08-23.csv`.
#[must_use]
pub fn report_file_name(format: OutputFormat, date: NaiveDate) -> String {
    format!(
        "payment-report-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Write payments into `output_dir` under a dated report file name.
///
/// # Arguments
///
/// * `payments` - Payments to write, already filtered and ordered
/// * `format` - Output format (TXT, CSV, or JSON)
/// * `output_dir` - Directory for the file; created if absent
/// * `date` - Date stamped into the file name
///
/// # Returns
///
/// Path of the file written.
pub fn write_report(
    payments: &[Payment],
    format: OutputFormat,
    output_dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    create_dir_all(output_dir)?;
    let file_path = output_dir.join(report_file_name(format, date));
    write_payments_to_file(payments, format, &file_path)?;
    Ok(file_path)
}

/// Write payments to a file in the specified format.
///
/// # Arguments
///
/// * `payments` - Payments to write
/// * `format` - Output format (TXT, CSV, or JSON)
/// * `file_path` - Path to the output file
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn write_payments_to_file(
    payments: &[Payment],
    format: OutputFormat,
    file_path: &Path,
) -> Result<()> {
    match format {
        OutputFormat::Txt => write_txt_file(payments, file_path),
        OutputFormat::Csv => write_csv_file(payments, file_path),
        OutputFormat::Json => write_json_file(payments, file_path),
    }
}

/// Write payments to a text file.
///
/// Format: one line per payment with a blank line between entries.
fn write_txt_file(payments: &[Payment], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);

    for payment in payments {
        let milestone = payment
            .milestone_number
            .map_or(String::new(), |m| format!(" - M{m}"));
        writeln!(
            writer,
            "{} ({}{}), {}, due {}, owed {}",
            payment.description,
            payment.project_name,
            milestone,
            payment.status,
            format_date(payment.due_date),
            format_currency(payment.amount_owed)
        )?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write payments to a CSV file.
///
/// Includes a header row; dates render like the views, amounts stay raw.
fn write_csv_file(payments: &[Payment], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "ID",
        "Description",
        "Project",
        "Milestone",
        "Status",
        "Due Date",
        "Invoice Number",
        "Expected USD",
        "Paid USD",
        "Owed USD",
    ])?;

    for payment in payments {
        writer.write_record(&[
            payment.id.to_string(),
            payment.description.clone(),
            payment.project_name.clone(),
            payment
                .milestone_number
                .map_or(String::new(), |m| m.to_string()),
            payment.status.as_str().to_owned(),
            format_date(payment.due_date),
            payment.invoice_number.clone().unwrap_or_default(),
            payment.expected_payment_usd.to_string(),
            payment.amount_paid_usd.to_string(),
            payment.amount_owed.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write payments to a JSON file.
///
/// Outputs a pretty-printed JSON array in the wire shape.
fn write_json_file(payments: &[Payment], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &payments)?;
    Ok(())
}
