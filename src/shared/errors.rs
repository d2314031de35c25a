use thiserror::Error;

/// Storage errors shared by the collection store and the settings file.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported schema version {found} (max supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Persistence writer is no longer running")]
    WriterClosed,
}

impl StorageError {
    pub fn unsupported_version(found: u32, supported: u32) -> Self {
        StorageError::UnsupportedVersion { found, supported }
    }
}
