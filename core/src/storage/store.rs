use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

use labcred_webclient::{CredentialRecord, LabSite};

use super::error::{Error, Result};
use crate::config;

/// How long an extracted record may be used. Anything older is erased
/// the moment it is read.
pub fn expiry_window() -> Duration {
    Duration::minutes(5)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub record: CredentialRecord,
    pub extracted_at: DateTime<Local>,
    #[serde(default)]
    pub extracted_from_page: bool,
    #[serde(default)]
    pub last_saved: Option<DateTime<Local>>,
}

impl StoredRecord {
    pub fn new(record: CredentialRecord, extracted_from_page: bool, now: DateTime<Local>) -> Self {
        Self {
            record,
            extracted_at: now,
            extracted_from_page,
            last_saved: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        now - self.extracted_at > expiry_window()
    }
}

/// One JSON blob per lab site; every read and write moves the whole blob.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    filepath: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl AsRef<Path>, site: LabSite) -> Self {
        Self {
            filepath: dir.as_ref().join(config::credentials_filename(site)),
        }
    }

    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    #[must_use]
    pub fn save(&self, stored: &StoredRecord) -> Result<()> {
        if let Some(dir) = self.filepath.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::CreateDir(dir.to_owned(), e))?;
        }
        let json = serde_json::to_string_pretty(stored)
            .map_err(|e| Error::SerializeToJson(self.filepath.clone(), e))?;
        fs::write(&self.filepath, json).map_err(|e| Error::WriteStore(self.filepath.clone(), e))
    }

    /// Load the stored record, enforcing the expiry invariant: a missing
    /// blob is `None`, and an expired blob is erased and reported as
    /// `None` rather than surfaced.
    #[must_use]
    pub fn load_fresh(&self, now: DateTime<Local>) -> Result<Option<StoredRecord>> {
        let json = match fs::read_to_string(&self.filepath) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::ReadStore(self.filepath.clone(), e)),
        };
        let stored: StoredRecord = serde_json::from_str(&json)
            .map_err(|e| Error::DeserializeFromJson(self.filepath.clone(), e))?;

        if stored.is_expired(now) {
            log::info!(
                "stored credentials expired (extracted at {}), erasing",
                stored.extracted_at
            );
            self.clear()?;
            return Ok(None);
        }
        Ok(Some(stored))
    }

    #[must_use]
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.filepath) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::EraseStore(self.filepath.clone(), e)),
        }
    }
}
