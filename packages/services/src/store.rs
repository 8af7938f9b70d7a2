//! # Record Store Boundary
//!
//! List/append access to contacts and invoices.
//!
//! - [`UnconfiguredStore`]: no backend; every call is `Unavailable`
//! - [`MemoryStore`]: process-local
//! - [`FileStore`]: one JSON file, replaced on every append
//!
//! Listings are newest first. Contact ids are assigned by the store.

use crate::error::RecordStoreError;
use crate::records::{CrmContact, Invoice, NewContact};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn contacts(&self) -> Result<Vec<CrmContact>, RecordStoreError>;

    /// Store a contact, stamping its id and last-contacted date
    async fn add_contact(&self, contact: NewContact) -> Result<CrmContact, RecordStoreError>;

    async fn invoices(&self) -> Result<Vec<Invoice>, RecordStoreError>;

    async fn add_invoice(&self, invoice: Invoice) -> Result<Invoice, RecordStoreError>;
}

/// Store to use for an optional configured path
pub fn open_store(path: Option<PathBuf>) -> Box<dyn RecordStore> {
    match path {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(UnconfiguredStore),
    }
}

/// All records, in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Records {
    #[serde(default)]
    contacts: Vec<CrmContact>,
    #[serde(default)]
    invoices: Vec<Invoice>,
}

impl Records {
    fn push_contact(&mut self, contact: NewContact) -> CrmContact {
        let id = self.contacts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let contact = contact.into_contact(id, Utc::now().date_naive());
        self.contacts.push(contact.clone());
        contact
    }

    fn newest_contacts(&self) -> Vec<CrmContact> {
        self.contacts.iter().rev().cloned().collect()
    }

    fn newest_invoices(&self) -> Vec<Invoice> {
        self.invoices.iter().rev().cloned().collect()
    }
}

/// Backend that was never configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredStore;

impl UnconfiguredStore {
    fn unavailable<T>() -> Result<T, RecordStoreError> {
        Err(RecordStoreError::Unavailable(
            "no record store configured; set \"recordStore\" in sonasite.config.json".to_string(),
        ))
    }
}

#[async_trait]
impl RecordStore for UnconfiguredStore {
    async fn contacts(&self) -> Result<Vec<CrmContact>, RecordStoreError> {
        Self::unavailable()
    }

    async fn add_contact(&self, _contact: NewContact) -> Result<CrmContact, RecordStoreError> {
        Self::unavailable()
    }

    async fn invoices(&self) -> Result<Vec<Invoice>, RecordStoreError> {
        Self::unavailable()
    }

    async fn add_invoice(&self, _invoice: Invoice) -> Result<Invoice, RecordStoreError> {
        Self::unavailable()
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn contacts(&self) -> Result<Vec<CrmContact>, RecordStoreError> {
        Ok(self.records.lock().await.newest_contacts())
    }

    async fn add_contact(&self, contact: NewContact) -> Result<CrmContact, RecordStoreError> {
        Ok(self.records.lock().await.push_contact(contact))
    }

    async fn invoices(&self) -> Result<Vec<Invoice>, RecordStoreError> {
        Ok(self.records.lock().await.newest_invoices())
    }

    async fn add_invoice(&self, invoice: Invoice) -> Result<Invoice, RecordStoreError> {
        self.records.lock().await.invoices.push(invoice.clone());
        Ok(invoice)
    }
}

/// Store persisted as a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Records, RecordStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(Records::default()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Record store file missing; starting empty");
                Ok(Records::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, records: &Records) -> Result<(), RecordStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let text = serde_json::to_string_pretty(records)?;

        // The records file is only ever replaced by rename, never rewritten in place
        let staging = self.staging_path();
        let written = match tokio::fs::write(&staging, text).await {
            Ok(()) => tokio::fs::rename(&staging, &self.path).await,
            Err(e) => Err(e),
        };
        written.map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to write record store");
            RecordStoreError::from(e)
        })
    }

    /// Sibling file the next save is written to before it replaces `path`
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "records.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn contacts(&self) -> Result<Vec<CrmContact>, RecordStoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.newest_contacts())
    }

    async fn add_contact(&self, contact: NewContact) -> Result<CrmContact, RecordStoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let contact = records.push_contact(contact);
        self.save(&records).await?;
        debug!(id = contact.id, "Stored contact");
        Ok(contact)
    }

    async fn invoices(&self) -> Result<Vec<Invoice>, RecordStoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.newest_invoices())
    }

    async fn add_invoice(&self, invoice: Invoice) -> Result<Invoice, RecordStoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        records.invoices.push(invoice.clone());
        self.save(&records).await?;
        debug!(id = %invoice.id, "Stored invoice");
        Ok(invoice)
    }
}
