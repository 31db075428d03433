//! File-based content and profile storage.
//!
//! Layout under the data directory:
//! - `memes.json`: a JSON array of content records
//! - `profiles/<user_id>.json`: one profile record per user
//!
//! Profile writes are atomic via temp file + rename.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::core::{ContentRecord, HistoricalFlag, UserProfileRecord};
use crate::error::{EngagementError, Result};
use crate::storage::{ContentStore, ProfileStore};

/// Name of the content snapshot file.
pub const CONTENT_FILE: &str = "memes.json";

/// Name of the profile directory.
pub const PROFILES_DIR: &str = "profiles";

/// Maximum content snapshot size that will be read into memory (64 MB).
pub const MAX_CONTENT_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// File-based store implementing both store traits.
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
    // Serializes read-modify-write of profile files within this process.
    profile_writes: Mutex<()>,
}

impl FileStore {
    /// Create a store rooted at the configured data directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let dir = config.data_dir().ok_or_else(|| {
            EngagementError::config("Could not determine data directory (no home directory)")
        })?;
        Ok(Self::with_dir(dir))
    }

    /// Create a store rooted at `data_dir`.
    ///
    /// The directory does not need to exist yet. A missing `memes.json` reads
    /// as an empty collection.
    pub fn with_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            profile_writes: Mutex::new(()),
        }
    }

    /// The directory this store reads from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn content_path(&self) -> PathBuf {
        self.data_dir.join(CONTENT_FILE)
    }

    fn profiles_dir(&self) -> PathBuf {
        self.data_dir.join(PROFILES_DIR)
    }

    fn profile_path(&self, user_id: &str) -> Result<PathBuf> {
        validate_user_id(user_id)?;
        Ok(self.profiles_dir().join(format!("{}.json", user_id)))
    }

    // Profiles always end in `.json`, so a `.tmp` name never shadows one.
    fn temp_profile_path(&self, user_id: &str) -> PathBuf {
        self.profiles_dir().join(format!("{}.json.tmp", user_id))
    }

    async fn read_profile(&self, path: &Path) -> Result<Option<UserProfileRecord>> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EngagementError::storage(path, e)),
        }
    }

    async fn write_profile(&self, profile: &UserProfileRecord) -> Result<()> {
        let final_path = self.profile_path(&profile.user_id)?;
        let temp_path = self.temp_profile_path(&profile.user_id);
        let dir = self.profiles_dir();

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| EngagementError::storage(&dir, e))?;

        let json = serde_json::to_string_pretty(profile)?;
        {
            let mut file = fs::File::create(&temp_path)
                .await
                .map_err(|e| EngagementError::storage(&temp_path, e))?;
            file.write_all(json.as_bytes())
                .await
                .map_err(|e| EngagementError::storage(&temp_path, e))?;
            file.sync_all()
                .await
                .map_err(|e| EngagementError::storage(&temp_path, e))?;
        }

        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| EngagementError::storage(&final_path, e))?;

        Ok(())
    }

    /// Replace the content snapshot.
    pub async fn write_content(&self, records: &[ContentRecord]) -> Result<()> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| EngagementError::storage(&self.data_dir, e))?;

        let path = self.content_path();
        let temp_path = self.data_dir.join(format!(".{}.tmp", CONTENT_FILE));
        let json = serde_json::to_string_pretty(records)?;

        fs::write(&temp_path, json)
            .await
            .map_err(|e| EngagementError::storage(&temp_path, e))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| EngagementError::storage(&path, e))?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for FileStore {
    async fn fetch_all(&self) -> Result<Vec<ContentRecord>> {
        let path = self.content_path();

        let metadata = match fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no content snapshot, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(EngagementError::storage(&path, e)),
        };

        if metadata.len() > MAX_CONTENT_FILE_SIZE {
            return Err(EngagementError::store(format!(
                "content snapshot {} is too large ({} bytes, max {} bytes)",
                path.display(),
                metadata.len(),
                MAX_CONTENT_FILE_SIZE
            )));
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| EngagementError::storage(&path, e))?;
        let records: Vec<ContentRecord> = serde_json::from_str(&content)?;
        tracing::debug!(records = records.len(), "loaded content snapshot");
        Ok(records)
    }
}

#[async_trait]
impl ProfileStore for FileStore {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfileRecord>> {
        let path = self.profile_path(user_id)?;
        self.read_profile(&path).await
    }

    async fn mark_flag(&self, user_id: &str, flag: HistoricalFlag) -> Result<bool> {
        let path = self.profile_path(user_id)?;
        let _guard = self.profile_writes.lock().await;

        let mut profile = self
            .read_profile(&path)
            .await?
            .unwrap_or_else(|| UserProfileRecord::new(user_id));
        if profile.user_id.is_empty() {
            profile.user_id = user_id.to_string();
        }

        if !profile.mark(flag) {
            return Ok(false);
        }
        self.write_profile(&profile).await?;
        Ok(true)
    }
}

/// Reject ids that cannot be used as a single path component.
///
/// Leading dots are legal document ids; only `.` and `..` are refused.
fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.is_empty()
        || user_id == "."
        || user_id == ".."
        || user_id.contains(['/', '\\', '\0'])
    {
        return Err(EngagementError::invalid_input(format!(
            "user id cannot be used as a profile file name: {:?}",
            user_id
        )));
    }
    Ok(())
}
