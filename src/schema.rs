//! Store layout definitions
//!
//! This module provides constants for the keys used in the embedded
//! key-value store, plus the well-known file names the application reads
//! and writes. Keeping them in one place means the store layout can be
//! audited at a glance.

/// Key-value store keys
pub mod keys {
    /// All payment milestones, as a JSON array
    pub const PAYMENTS: &str = "payments";
    /// All project contacts, as a JSON array
    pub const CONTACTS: &str = "contacts";
    /// Configured spreadsheet sync URL
    pub const SHEETS_URL: &str = "sheetsUrl";
    /// Configured sync frequency
    pub const SYNC_FREQUENCY: &str = "syncFrequency";
}

/// Bundled seed dataset file names
pub mod seeds {
    /// Seed payments, loaded on first run when the store is empty
    pub const PAYMENTS_FILE: &str = "payments_data.json";
    /// Seed contacts, loaded on first run when the store is empty
    pub const CONTACTS_FILE: &str = "contacts_data.json";
}

/// Export file naming
pub mod export {
    /// Prefix for backup files; the current date and `.json` are appended
    pub const FILE_PREFIX: &str = "payment-tracker-export-";
    /// Extension for backup files
    pub const FILE_EXTENSION: &str = "json";
}
