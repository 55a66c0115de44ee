use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tracing::info;

/// Key/value store that keeps one JSON file per key under a root directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written value.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("failed to create history directory {}", root.display()))?;
        info!(root = %root.display(), "initialized file history store");

        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_stem(key)))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json.tmp", file_stem(key)))
    }

    pub async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(anyhow::anyhow!(
                "failed to read `{}`: {err}",
                path.display()
            )),
        }
    }

    pub async fn set(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()> {
        let path = self.path_for(key);
        let temp_path = self.temp_path_for(key);

        tokio::fs::write(&temp_path, value)
            .await
            .with_context(|| format!("failed to write `{}`", temp_path.display()))?;
        tokio::fs::rename(&temp_path, &path)
            .await
            .with_context(|| format!("failed to move history into `{}`", path.display()))?;

        Ok(())
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(anyhow::anyhow!(
                "failed to delete `{}`: {err}",
                path.display()
            )),
        }
    }
}

/// Map a storage key onto a portable file name.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}
