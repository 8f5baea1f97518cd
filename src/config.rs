use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StudyError};

/// Uploads above 50 MiB are rejected before any extraction happens.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub seed: Option<u64>,
    /// Splits a plain-text document into pages (form feed, as emitted by pdftotext).
    pub page_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(".studybuddy"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            seed: None,
            page_separator: "\u{000C}".to_string(),
        }
    }
}

impl Config {
    fn validate(self, source: &Path) -> Result<Self> {
        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(StudyError::Config(format!(
                "data_dir specified in {} ('{}') is not a directory.",
                source.display(),
                self.data_dir.display()
            )));
        }
        if self.max_upload_bytes == 0 {
            return Err(StudyError::Config(format!(
                "max_upload_bytes in {} must be greater than zero.",
                source.display()
            )));
        }
        if self.page_separator.is_empty() {
            return Err(StudyError::Config(format!(
                "page_separator in {} must not be empty.",
                source.display()
            )));
        }
        Ok(self)
    }
}

pub fn parse_config(contents: &str, source: &Path) -> Result<Config> {
    let config: Config = toml::from_str(contents)?;
    config.validate(source)
}

/// Loads `file_path`, falling back to defaults when the file does not exist.
pub fn load_config_from_file(file_path: &Path) -> Result<Config> {
    if !file_path.exists() {
        log::debug!("No config at {}, using defaults", file_path.display());
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(file_path)?;
    parse_config(&contents, file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("", Path::new("studybuddy.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_upload_bytes, 52_428_800);
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            "seed = 7\ndata_dir = \"state\"\n",
            Path::new("studybuddy.toml"),
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.data_dir, PathBuf::from("state"));
        assert_eq!(config.page_separator, "\u{000C}");
    }

    #[test]
    fn test_zero_upload_limit_rejected() {
        let err = parse_config("max_upload_bytes = 0", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, StudyError::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = parse_config("seed = \"abc\"", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, StudyError::Toml(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config_from_file(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
