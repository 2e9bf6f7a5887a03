//! Service layer tying the store, seed files, and backup flows together.
//!
//! The service owns the persistence seam: it loads collections (seeding
//! them from the bundled JSON on first run), replaces them on import,
//! writes backups and reports, and keeps the sync settings. Aggregation
//! stays in [`crate::aggregate`]; the service hands whole collections to
//! callers.

use chrono::Utc;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::error::{Result, TrackerError};
use crate::export::{self, BackupDocument};
use crate::file_writer;
use crate::logging::OperationTimer;
use crate::metrics::{MetricsCollector, MetricsTimer};
use crate::models::{Contact, OutputFormat, Payment, SyncSettings};
use crate::record_store_operation;
use crate::schema::seeds;
use crate::store::RecordStore;

/// Find a payment by id or fail with [`TrackerError::PaymentNotFound`].
pub fn require_payment(payments: &[Payment], id: i64) -> Result<&Payment> {
    payments
        .iter()
        .find(|p| p.id == id)
        .ok_or(TrackerError::PaymentNotFound(id))
}

/// Find a contact by id or fail with [`TrackerError::ContactNotFound`].
pub fn require_contact(contacts: &[Contact], id: i64) -> Result<&Contact> {
    contacts
        .iter()
        .find(|c| c.id == id)
        .ok_or(TrackerError::ContactNotFound(id))
}

/// Check that at least one payment belongs to the named project.
pub fn require_project(payments: &[Payment], name: &str) -> Result<()> {
    if payments.iter().any(|p| p.project_name == name) {
        Ok(())
    } else {
        Err(TrackerError::ProjectNotFound(name.to_owned()))
    }
}

/// The application service: persistence, seeding, backups, and reports.
pub struct TrackerService {
    store: Box<dyn RecordStore>,
    metrics: MetricsCollector,
}

impl TrackerService {
    /// Create a service over the given store.
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self {
            store,
            metrics: MetricsCollector::default(),
        }
    }

    /// The collector used for this service's metrics.
    #[must_use]
    pub const fn metrics(&self) -> MetricsCollector {
        self.metrics
    }

    /// Load both collections, seeding either one the store has never held.
    ///
    /// Each collection seeds independently: a successfully read seed file
    /// is persisted right away, while a missing or malformed seed file
    /// leaves that collection empty without writing anything.
    pub async fn load_or_seed(&self, seed_dir: &Path) -> Result<(Vec<Payment>, Vec<Contact>)> {
        let timer = OperationTimer::new("load_or_seed");

        let payments = match self.store.load_payments().await? {
            Some(stored) => stored,
            None => self.seed_payments(seed_dir).await,
        };

        let contacts = match self.store.load_contacts().await? {
            Some(stored) => stored,
            None => self.seed_contacts(seed_dir).await,
        };

        self.metrics.set_collection_size("payments", payments.len());
        self.metrics.set_collection_size("contacts", contacts.len());
        timer.finish();

        Ok((payments, contacts))
    }

    async fn seed_payments(&self, seed_dir: &Path) -> Vec<Payment> {
        match read_seed_file::<Vec<Payment>>(&seed_dir.join(seeds::PAYMENTS_FILE)).await {
            Ok(seeded) => {
                if let Err(save_error) = self.store.save_payments(&seeded).await {
                    warn!(error = %save_error, "failed to persist seeded payments");
                }
                self.metrics.record_seed("payments", seeded.len());
                info!(count = seeded.len(), "seeded payments from bundled data");
                seeded
            }
            Err(seed_error) => {
                error!(error = %seed_error, "error loading initial payment data");
                Vec::new()
            }
        }
    }

    async fn seed_contacts(&self, seed_dir: &Path) -> Vec<Contact> {
        match read_seed_file::<Vec<Contact>>(&seed_dir.join(seeds::CONTACTS_FILE)).await {
            Ok(seeded) => {
                if let Err(save_error) = self.store.save_contacts(&seeded).await {
                    warn!(error = %save_error, "failed to persist seeded contacts");
                }
                self.metrics.record_seed("contacts", seeded.len());
                info!(count = seeded.len(), "seeded contacts from bundled data");
                seeded
            }
            Err(seed_error) => {
                error!(error = %seed_error, "error loading initial contact data");
                Vec::new()
            }
        }
    }

    /// Write a backup of the given collections into `output_dir`.
    pub async fn export_backup(
        &self,
        payments: Vec<Payment>,
        contacts: Vec<Contact>,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let started = std::time::Instant::now();
        let document = BackupDocument::new(payments, contacts);
        let result = export::write_backup(&document, output_dir, Utc::now().date_naive()).await;
        record_store_operation!(self.metrics, "export_backup", started.elapsed(), result.is_ok());

        let path = result?;
        if let Ok(meta) = tokio::fs::metadata(&path).await {
            self.metrics.record_export_file_size(meta.len());
        }
        self.metrics.record_export("payments", document.payments.len());
        self.metrics.record_export("contacts", document.contacts.len());

        Ok(path)
    }

    /// Replace both collections from a backup file.
    ///
    /// The file is validated in full before either collection is written,
    /// so a rejected backup leaves the store untouched.
    pub async fn import_backup(&self, input: &Path) -> Result<(usize, usize)> {
        let timer = MetricsTimer::new(self.metrics, "import_backup");
        match self.import_backup_inner(input).await {
            Ok(counts) => {
                timer.finish(true);
                Ok(counts)
            }
            Err(import_error) => {
                timer.finish(false);
                Err(import_error)
            }
        }
    }

    async fn import_backup_inner(&self, input: &Path) -> Result<(usize, usize)> {
        let (payments, contacts) = export::read_backup(input).await?;

        self.store.save_payments(&payments).await?;
        self.store.save_contacts(&contacts).await?;

        self.metrics.record_import("payments", payments.len());
        self.metrics.record_import("contacts", contacts.len());
        self.metrics.set_collection_size("payments", payments.len());
        self.metrics.set_collection_size("contacts", contacts.len());
        info!(
            payments = payments.len(),
            contacts = contacts.len(),
            "data imported successfully"
        );

        Ok((payments.len(), contacts.len()))
    }

    /// Write a report of the given payments in the requested format.
    pub fn write_report(
        &self,
        payments: &[Payment],
        format: OutputFormat,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let path = file_writer::write_report(payments, format, output_dir, Utc::now().date_naive())?;
        self.metrics.record_report(format.extension());
        info!(path = %path.display(), records = payments.len(), "report written");
        Ok(path)
    }

    /// Stored sync settings.
    pub async fn sync_settings(&self) -> Result<SyncSettings> {
        self.store.load_sync_settings().await
    }

    /// Overlay the given values onto the stored sync settings and persist
    /// the result.
    pub async fn update_sync_settings(
        &self,
        sheets_url: Option<String>,
        frequency: Option<String>,
    ) -> Result<SyncSettings> {
        let mut settings = self.store.load_sync_settings().await?;
        if let Some(url) = sheets_url {
            settings.sheets_url = Some(url);
        }
        if let Some(freq) = frequency {
            settings.frequency = Some(freq);
        }

        self.store.save_sync_settings(&settings).await?;
        info!("sync settings saved");
        Ok(settings)
    }

    /// Trigger a sync run. Currently a stub that reports the feature as
    /// not yet available.
    // TODO: implement Google Sheets sync against the configured sheetsUrl
    pub async fn sync_now(&self) -> Result<String> {
        let settings = self.store.load_sync_settings().await?;
        info!(
            configured = settings.sheets_url.is_some(),
            "sync requested"
        );
        Ok("Sync feature coming soon!".to_string())
    }
}

async fn read_seed_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}
