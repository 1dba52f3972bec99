// Configuration loading and parsing (config/demari.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::validator::DuplicateCheck;

/// Name of the single configuration file under `config/` and `defaults/`.
pub const CONFIG_FILE_NAME: &str = "demari.toml";

/// Backend the original web client talked to.
pub const DEFAULT_BASE_URL: &str = "https://demari-bets-back.vercel.app/";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// `[api]`: where the betting backend lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// `[session]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long the "bet registered" acknowledgement stays visible.
    pub acknowledgement_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            acknowledgement_secs: 3,
        }
    }
}

impl SessionConfig {
    pub fn acknowledgement_window(&self) -> Duration {
        Duration::from_secs(self.acknowledgement_secs)
    }
}

/// `[validation]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Re-check the whole number set for duplicates on every edit instead of
    /// only the number just typed.
    pub strict_duplicates: bool,
}

impl ValidationConfig {
    pub fn duplicate_check(&self) -> DuplicateCheck {
        if self.strict_duplicates {
            DuplicateCheck::Strict
        } else {
            DuplicateCheck::LastEdit
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/demari.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` handles that.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE_NAME);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Seed `config/demari.toml` from `defaults/demari.toml` when it is missing.
/// Returns the created path, or `None` when an existing file was kept.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE_NAME);
    if target.exists() {
        return Ok(None);
    }
    let source = base_dir.join("defaults").join(CONFIG_FILE_NAME);
    let defaults = std::fs::read(&source).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "no config at {} and cannot read {}: {e}",
            target.display(),
            source.display()
        ),
    })?;

    let copy_err = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    };
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(copy_err)?;
    }
    // create_new so a file written concurrently is never clobbered.
    match std::fs::OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, &defaults).map_err(copy_err)?;
            Ok(Some(target.clone()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(copy_err(e)),
    }
}

/// Load config relative to the current working directory, copying defaults
/// into `config/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if let Some(created) = ensure_config_file(&cwd)? {
        info!("Created {} from defaults", created.display());
    }
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = config.api.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must be an http(s) URL, got {url:?}"),
        });
    }

    if config.session.acknowledgement_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "session.acknowledgement_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Workspace root, where `defaults/` lives.
    fn project_root() -> PathBuf {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        manifest
            .ancestors()
            .find(|dir| dir.join("defaults").join(CONFIG_FILE_NAME).exists())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| panic!("Cannot locate defaults/ above {:?}", manifest))
    }

    /// Fresh temp dir containing `config/demari.toml` with `contents`.
    fn config_dir_with(name: &str, contents: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE_NAME), contents).unwrap();
        tmp
    }

    #[test]
    fn default_file_matches_builtin_defaults() {
        let tmp = std::env::temp_dir().join("demari_config_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::copy(
            project_root().join("defaults").join(CONFIG_FILE_NAME),
            tmp.join("config").join(CONFIG_FILE_NAME),
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("defaults should load");
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.session.acknowledgement_window(), Duration::from_secs(3));
        assert_eq!(config.validation.duplicate_check(), DuplicateCheck::LastEdit);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let tmp = config_dir_with(
            "demari_config_partial",
            "[api]\nbase_url = \"http://localhost:3333/\"\n",
        );
        let config = load_config_from(&tmp).expect("partial config should load");
        assert_eq!(config.api.base_url, "http://localhost:3333/");
        assert_eq!(config.session.acknowledgement_secs, 3);
        assert!(!config.validation.strict_duplicates);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn strict_duplicates_selects_strict_check() {
        let tmp = config_dir_with(
            "demari_config_strict",
            "[validation]\nstrict_duplicates = true\n",
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.validation.duplicate_check(), DuplicateCheck::Strict);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let tmp = config_dir_with("demari_config_bad_url", "[api]\nbase_url = \"ftp://x/\"\n");
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "api.base_url"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_acknowledgement_window() {
        let tmp = config_dir_with(
            "demari_config_zero_ack",
            "[session]\nacknowledgement_secs = 0\n",
        );
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "session.acknowledgement_secs")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = config_dir_with("demari_config_invalid", "[api\nbase_url = ");
        assert!(matches!(
            load_config_from(&tmp).unwrap_err(),
            ConfigError::ParseError { .. }
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = std::env::temp_dir().join("demari_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        assert!(matches!(
            load_config_from(&tmp).unwrap_err(),
            ConfigError::FileNotFound { .. }
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_seeds_from_defaults() {
        let tmp = std::env::temp_dir().join("demari_config_ensure_seeds");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::copy(
            project_root().join("defaults").join(CONFIG_FILE_NAME),
            tmp.join("defaults").join(CONFIG_FILE_NAME),
        )
        .unwrap();

        let created = ensure_config_file(&tmp).expect("should succeed");
        assert_eq!(created, Some(tmp.join("config").join(CONFIG_FILE_NAME)));
        assert_eq!(load_config_from(&tmp).unwrap(), Config::default());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_keeps_existing() {
        let tmp = config_dir_with("demari_config_ensure_keeps", "# custom\n");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE_NAME), "[api]\n").unwrap();

        assert_eq!(ensure_config_file(&tmp).expect("should succeed"), None);
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn existing_config_needs_no_defaults() {
        let tmp = config_dir_with("demari_config_no_defaults", "[api]\n");
        assert_eq!(ensure_config_file(&tmp).expect("should succeed"), None);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_errors_without_config_or_defaults() {
        let tmp = std::env::temp_dir().join("demari_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match ensure_config_file(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("cannot read"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        assert!(!tmp.join("config").exists());

        let _ = fs::remove_dir_all(&tmp);
    }
}
