//! Payment Tracker - Milestone and Contact Record Keeper
//!
//! A Rust library for tracking project payment milestones, the contact
//! sheets behind each project, and the views derived from them.
//!
//! # Features
//!
//! - Payments and contacts persisted in an embedded sled store
//! - First-run seeding from bundled JSON data
//! - Dashboard statistics, filtering, search, and project grouping
//! - View-state router mirroring the app's screen flow
//! - JSON backup export/import and TXT/CSV/JSON reports

/// Aggregation, filtering, search, and display formatting
pub mod aggregate;
/// Configuration management
pub mod config;
/// Error types
pub mod error;
/// Backup export and import
pub mod export;
/// Report file writing
pub mod file_writer;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// View-state navigation
pub mod router;
/// Storage keys and bundled file names
pub mod schema;
/// Service layer over the record store
pub mod service;
/// Record store trait and sled implementation
pub mod store;
/// Input validation and sanitization
pub mod validation;
/// View models built from router state
pub mod view;

// Re-export key components for easier access
pub use models::{Contact, DashboardStats, OutputFormat, Payment, PaymentStatus};
pub use service::TrackerService;
pub use store::{RecordStore, SledStore};
