// Uploaded images and documents, stored flat under the uploads directory
use std::path::{Path, PathBuf};
use thiserror::Error;

/// URL prefix uploaded files are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload is empty")]
    Empty,

    #[error("Upload of {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: usize, max: usize },

    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

pub struct UploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// Write `bytes` under a fresh name and return its public URL.
    /// The original file name only contributes its extension.
    pub fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: bytes.len(),
                max: self.max_bytes,
            });
        }

        let stem = uuid::Uuid::now_v7().to_string();
        let name = match original_name.and_then(extension_of) {
            Some(ext) => format!("{}.{}", stem, ext),
            None => stem,
        };

        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.root.join(&name), bytes)?;
        tracing::info!("Stored upload {} ({} bytes)", name, bytes.len());

        Ok(format!("{}/{}", PUBLIC_PREFIX, name))
    }

    /// Read a previously stored file. `Ok(None)` when it does not exist.
    pub fn read(&self, name: &str) -> Result<Option<Vec<u8>>, UploadError> {
        if !is_safe_name(name) {
            return Err(UploadError::InvalidName(name.to_string()));
        }
        match std::fs::read(self.root.join(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Lowercased extension, kept only if short and alphanumeric.
fn extension_of(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Flat names only: no separators, no parent references, no hidden files.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
}
