mod config;
mod data;
mod store;

pub use config::AppConfig;
pub use data::AppData;
pub use store::{Document, JsonStore};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de::DeserializeOwned;

pub const DATA_FILE: &str = "desktop_widgets_data.json";
pub const CONFIG_FILE: &str = "desktop_widgets_config.json";

/// Returns the directory holding both documents.
///
/// `STICKYDESK_DATA_DIR` wins when set. Otherwise `~/.config/stickydesk[-dev]/`,
/// where `STICKYDESK_ENV=dev` selects the development directory.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("STICKYDESK_DATA_DIR").filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STICKYDESK_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("stickydesk-dev")
    } else {
        base_dir.join("stickydesk")
    }
}

/// Locations of the two documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub data: PathBuf,
    pub config: PathBuf,
}

impl StorePaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data: dir.join(DATA_FILE),
            config: dir.join(CONFIG_FILE),
        }
    }

    /// An explicit directory if given, else [`data_dir`].
    pub fn resolve(explicit: Option<&Path>) -> Self {
        match explicit {
            Some(dir) => Self::in_dir(dir),
            None => Self::in_dir(data_dir()),
        }
    }
}

/// Strictly parse both documents without falling back to defaults.
///
/// # Errors
/// Returns the first read or parse failure.
pub fn verify(paths: &StorePaths) -> crate::error::Result<()> {
    JsonStore::<AppData>::new(&paths.data).read()?;
    JsonStore::<AppConfig>::new(&paths.config).read()?;
    Ok(())
}

/// Converts a raw JSON object into a typed map, dropping (and logging)
/// entries whose key or value does not parse. One bad entry must not cost
/// the user the rest of the document.
pub(crate) fn lenient_entries<K, V>(
    raw: BTreeMap<String, serde_json::Value>,
    section: &str,
) -> BTreeMap<K, V>
where
    K: FromStr + Ord,
    V: DeserializeOwned,
{
    raw.into_iter()
        .filter_map(|(key, value)| {
            let Ok(parsed) = key.parse::<K>() else {
                tracing::warn!(section, key = %key, "dropping entry with malformed key");
                return None;
            };
            match serde_json::from_value(value) {
                Ok(value) => Some((parsed, value)),
                Err(e) => {
                    tracing::warn!(section, key = %key, error = %e, "dropping entry with malformed value");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_share_one_directory() {
        let paths = StorePaths::in_dir("/tmp/desk");
        assert_eq!(paths.data, PathBuf::from("/tmp/desk").join(DATA_FILE));
        assert_eq!(paths.config, PathBuf::from("/tmp/desk").join(CONFIG_FILE));
        assert_eq!(StorePaths::resolve(Some(Path::new("/tmp/desk"))), paths);
    }

    #[test]
    fn verify_reports_corrupt_documents() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StorePaths::in_dir(dir.path());
        assert!(verify(&paths).is_ok());

        std::fs::write(&paths.config, "[1, 2").unwrap();
        assert!(matches!(
            verify(&paths),
            Err(crate::error::CoreError::Store(crate::error::StoreError::ParseFailed { .. }))
        ));
    }
}
