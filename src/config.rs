//! Credential store.
//!
//! A small TOML file at `<home>/.jats.toml` holding the server URL, the
//! username, and the opaque session token issued at login. The file is
//! written with owner-only permissions. All durable task state lives on
//! the server; this is the only thing the client persists.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const FILE_NAME: &str = ".jats.toml";

fn default_server_url() -> String {
    "http://localhost:8081".to_string()
}

/// Credential-store errors.
///
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    HomeDirectoryNotFound,

    #[error("failed to read credentials at {path}: {source}")]
    LoadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse credentials at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to write credentials at {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize credentials: {0}")]
    SerializationFailed(#[from] toml::ser::Error),
}

/// Server URL plus the current session identity.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            server_url: default_server_url(),
            username: None,
            token: None,
        }
    }
}

impl Config {
    /// Default location of the credential file.
    ///
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(FILE_NAME))
            .ok_or(ConfigError::HomeDirectoryNotFound)
    }

    /// Read the credential file at `path` (or the default location). A
    /// missing file yields the default configuration, which is written
    /// back best-effort so the user has something to edit.
    ///
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Config::default_path()?,
        };
        if !path.exists() {
            let config = Config::default();
            if let Err(error) = config.save(Some(&path)) {
                warn!("could not initialize credential file: {}", error);
            }
            return Ok(config);
        }
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::LoadFailed {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::ParseFailed { path, source })
    }

    /// Write the credential file with owner-only permissions, creating
    /// parent directories as needed.
    ///
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Config::default_path()?,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                create_parent_dirs(parent).map_err(|source| ConfigError::SaveFailed {
                    path: path.clone(),
                    source,
                })?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|source| ConfigError::SaveFailed {
            path: path.clone(),
            source,
        })?;
        restrict_permissions(&path).map_err(|source| ConfigError::SaveFailed { path, source })?;
        Ok(())
    }
}

#[cfg(unix)]
fn create_parent_dirs(parent: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(parent)
}

#[cfg(not(unix))]
fn create_parent_dirs(parent: &Path) -> std::io::Result<()> {
    fs::create_dir_all(parent)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_default_and_writes_it_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(".jats.toml");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server_url, "http://localhost:8081");
        assert_eq!(config.token, None);
        assert!(path.exists());
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".jats.toml");
        let config = Config {
            server_url: "http://tracker:9000".to_string(),
            username: Some("admin".to_string()),
            token: Some("abc".to_string()),
        };
        config.save(Some(&path)).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".jats.toml");
        Config::default().save(Some(&path)).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn optional_fields_are_omitted_from_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".jats.toml");
        Config::default().save(Some(&path)).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("server_url"));
        assert!(!raw.contains("token"));
        assert!(!raw.contains("username"));
    }
}
