use std::path::{Path, PathBuf};

const APP_DIR: &str = "nexus";

/// Get the base storage directory.
/// Returns `$NEXUS_DATA_DIR`, `$XDG_DATA_HOME/nexus`, the platform data dir
/// joined with `nexus`, or `./.nexus` as a last resort.
pub fn get_storage_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NEXUS_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        if !xdg_data.trim().is_empty() {
            return PathBuf::from(xdg_data).join(APP_DIR);
        }
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{}", APP_DIR)))
}

/// Get the logs directory path.
/// Returns `{storage_dir}/logs`.
pub fn get_log_dir(storage_dir: &Path) -> PathBuf {
    storage_dir.join("logs")
}

/// Get the settings file path.
/// Returns `{storage_dir}/settings.json`.
pub fn get_settings_path(storage_dir: &Path) -> PathBuf {
    storage_dir.join("settings.json")
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_dir_structure() {
        let storage = PathBuf::from("/tmp/nexus");

        let logs = get_log_dir(&storage);
        assert!(logs.ends_with("logs"));
        assert!(logs.starts_with(&storage));

        let settings = get_settings_path(&storage);
        assert!(settings.ends_with("settings.json"));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op
        ensure_dir(&nested).unwrap();
    }
}
