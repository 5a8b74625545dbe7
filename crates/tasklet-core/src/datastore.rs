use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use tasklet_shared::KeyValueStore;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

const STORE_FILE: &str = "store.json";

/// On-disk key-value store: one JSON object of string keys to string
/// values, standing in for the browser's per-origin `localStorage`.
#[derive(Debug)]
pub struct FileStore {
    pub data_dir: PathBuf,
    pub store_path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct StoreFile {
    entries: BTreeMap<String, String>,
}

impl FileStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let store_path = data_dir.join(STORE_FILE);

        info!(
            data_dir = %data_dir.display(),
            store = %store_path.display(),
            "opened key-value store"
        );

        Ok(Self {
            data_dir,
            store_path,
        })
    }

    fn read_raw(&self) -> anyhow::Result<Option<String>> {
        if !self.store_path.exists() {
            debug!(file = %self.store_path.display(), "store file missing, treating as empty");
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.store_path)
            .with_context(|| format!("failed reading {}", self.store_path.display()))?;
        Ok((!raw.trim().is_empty()).then_some(raw))
    }

    #[tracing::instrument(skip(self))]
    fn load(&self) -> anyhow::Result<StoreFile> {
        let Some(raw) = self.read_raw()? else {
            return Ok(StoreFile::default());
        };

        let file: StoreFile = serde_json::from_str(&raw)
            .with_context(|| format!("failed parsing {}", self.store_path.display()))?;
        debug!(keys = file.entries.len(), "loaded store file");
        Ok(file)
    }

    /// Like [`Self::load`], but an unparseable file is moved aside to
    /// `store.json.corrupt` and replaced by an empty one.
    #[tracing::instrument(skip(self))]
    fn load_for_write(&self) -> anyhow::Result<StoreFile> {
        let Some(raw) = self.read_raw()? else {
            return Ok(StoreFile::default());
        };

        match serde_json::from_str::<StoreFile>(&raw) {
            Ok(file) => Ok(file),
            Err(error) => {
                let aside = self.corrupt_path();
                warn!(
                    %error,
                    file = %self.store_path.display(),
                    backup = %aside.display(),
                    "store file is unreadable; moving it aside and starting empty"
                );
                fs::rename(&self.store_path, &aside).with_context(|| {
                    format!("failed to move {} aside", self.store_path.display())
                })?;
                Ok(StoreFile::default())
            }
        }
    }

    pub fn corrupt_path(&self) -> PathBuf {
        self.data_dir.join(format!("{STORE_FILE}.corrupt"))
    }

    #[tracing::instrument(skip(self, file))]
    fn save_atomic(&self, file: &StoreFile) -> anyhow::Result<()> {
        debug!(file = %self.store_path.display(), keys = file.entries.len(), "saving store atomically");

        let dir = self.store_path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        let serialized = serde_json::to_string_pretty(file)?;
        writeln!(temp, "{serialized}")?;
        temp.flush()?;

        temp.persist(&self.store_path).map_err(|err| {
            anyhow!("failed to persist {}: {}", self.store_path.display(), err)
        })?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.load()?.entries.get(key).cloned())
    }

    #[tracing::instrument(skip(self, value), fields(len = value.len()))]
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut file = self.load_for_write()?;
        file.entries.insert(key.to_string(), value.to_string());
        self.save_atomic(&file)
            .with_context(|| format!("failed to write key {key}"))
    }
}
