use std::{
    ops::{Deref, DerefMut},
    path::Path,
};

use anyhow::{anyhow, Context};
use chrono::Local;

use labcred_webclient::{CredentialRecord, LabSite, Url};

use crate::storage::{CredentialStore, StoredRecord};

/// A lab client tied to the on-disk credential store: scraped records go
/// in through it, auto-fill reads come out through the expiry gate.
pub struct CredPersistentClient {
    cli: Box<dyn labcred_webclient::LabClient>,
    store: CredentialStore,
}

impl Deref for CredPersistentClient {
    type Target = Box<dyn labcred_webclient::LabClient>;

    fn deref(&self) -> &Self::Target {
        &self.cli
    }
}

impl DerefMut for CredPersistentClient {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cli
    }
}

impl CredPersistentClient {
    pub fn new(site: LabSite, save_dir: impl AsRef<Path>) -> Self {
        Self {
            cli: labcred_webclient::new_client(site),
            store: CredentialStore::new(save_dir, site),
        }
    }

    pub fn new_with_parse_url(
        url: &str,
        save_dir: impl AsRef<Path>,
    ) -> anyhow::Result<(Self, Url)> {
        let url =
            Url::parse(url).map_err(|e| anyhow!("Failed to parse as URL '{}': {}", url, e))?;
        let site = labcred_webclient::detect_site_from_url(&url).with_context(|| {
            format!(
                "Cannot detect lab site from URL '{}'\n  Example of supported domain: poridhi.io",
                url
            )
        })?;
        Ok((Self::new(site, save_dir), url))
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Read the stored record through the expiry gate. Expired blobs are
    /// erased by the store and reported as absent.
    #[must_use]
    pub fn load_fresh_record(&self) -> anyhow::Result<Option<StoredRecord>> {
        self.store.load_fresh(Local::now()).with_context(|| {
            format!(
                "Cannot load credential store '{}'",
                self.store.filepath().to_string_lossy()
            )
        })
    }

    /// Persist a record freshly scraped off the lab page.
    #[must_use]
    pub fn save_extracted(&self, record: &CredentialRecord) -> anyhow::Result<()> {
        let stored = StoredRecord::new(record.clone(), true, Local::now());
        self.store.save(&stored).map_err(Into::into)
    }

    /// Persist a hand-entered or hand-edited record.
    #[must_use]
    pub fn save_manual(&self, record: &CredentialRecord) -> anyhow::Result<()> {
        let now = Local::now();
        let mut stored = StoredRecord::new(record.clone(), false, now);
        stored.last_saved = Some(now);
        self.store.save(&stored).map_err(Into::into)
    }

    #[must_use]
    pub fn clear_store(&self) -> anyhow::Result<()> {
        self.store.clear().map_err(Into::into)
    }
}
