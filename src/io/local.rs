use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// A ZIP archive on the local filesystem, read whole into memory.
pub struct LocalArchive {
    path: PathBuf,
    size: u64,
}

impl LocalArchive {
    /// Open an archive, checking that `path` names an existing regular file.
    pub async fn open(path: &Path) -> Result<Self> {
        let metadata = match fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => bail!("File does not exist: {}", path.display()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    /// Read the entire archive.
    pub async fn read_all(&self) -> Result<Vec<u8>> {
        let data = fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        debug!(path = %self.path.display(), size = data.len(), "loaded archive");
        Ok(data)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size reported by the filesystem when the archive was opened.
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Write a complete archive buffer to `path`, replacing any existing file.
pub async fn write_archive(path: &Path, data: &[u8]) -> Result<()> {
    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut file = fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(data)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.flush().await?;

    debug!(path = %path.display(), size = data.len(), "wrote archive");
    Ok(())
}
