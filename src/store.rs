//! Persistent storage for the tracker's collections and settings.
//!
//! The whole dataset is small enough to load and store wholesale, so the
//! store is a key-value layout: one key per collection, serialized as the
//! same JSON that travels through export and import, plus two plain-string
//! keys for the sync settings. [`RecordStore`] is the seam the service
//! talks through; [`SledStore`] is the embedded implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::models::{Contact, Payment, SyncSettings};
use crate::schema::keys;

/// Persistence boundary for payments, contacts, and sync settings.
///
/// Loads return `None` when a collection has never been stored, which is
/// what triggers first-run seeding; a stored empty collection loads as
/// `Some` with an empty vector.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the payment collection, or `None` if it was never stored.
    async fn load_payments(&self) -> Result<Option<Vec<Payment>>>;

    /// Replace the stored payment collection.
    async fn save_payments(&self, payments: &[Payment]) -> Result<()>;

    /// Load the contact collection, or `None` if it was never stored.
    async fn load_contacts(&self) -> Result<Option<Vec<Contact>>>;

    /// Replace the stored contact collection.
    async fn save_contacts(&self, contacts: &[Contact]) -> Result<()>;

    /// Load the sync settings; unset fields come back as `None`.
    async fn load_sync_settings(&self) -> Result<SyncSettings>;

    /// Replace the stored sync settings. `None` fields clear their keys.
    async fn save_sync_settings(&self, settings: &SyncSettings) -> Result<()>;
}

/// Embedded key-value store backed by sled.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open or create the store in the given directory.
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        debug!(path = %path.display(), "opened record store");
        Ok(Self { db })
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.db.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_vec(value)?;
        self.db.insert(key, raw)?;
        self.db.flush()?;
        Ok(())
    }

    fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .db
            .get(key)?
            .map(|raw| String::from_utf8_lossy(&raw).into_owned()))
    }

    fn put_string(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => {
                self.db.insert(key, value.as_bytes())?;
            }
            None => {
                self.db.remove(key)?;
            }
        }
        self.db.flush()?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SledStore {
    async fn load_payments(&self) -> Result<Option<Vec<Payment>>> {
        self.get_json(keys::PAYMENTS)
    }

    async fn save_payments(&self, payments: &[Payment]) -> Result<()> {
        self.put_json(keys::PAYMENTS, &payments)
    }

    async fn load_contacts(&self) -> Result<Option<Vec<Contact>>> {
        self.get_json(keys::CONTACTS)
    }

    async fn save_contacts(&self, contacts: &[Contact]) -> Result<()> {
        self.put_json(keys::CONTACTS, &contacts)
    }

    async fn load_sync_settings(&self) -> Result<SyncSettings> {
        Ok(SyncSettings {
            sheets_url: self.get_string(keys::SHEETS_URL)?,
            frequency: self.get_string(keys::SYNC_FREQUENCY)?,
        })
    }

    async fn save_sync_settings(&self, settings: &SyncSettings) -> Result<()> {
        self.put_string(keys::SHEETS_URL, settings.sheets_url.as_deref())?;
        self.put_string(keys::SYNC_FREQUENCY, settings.frequency.as_deref())
    }
}
