use markdown_autoformat_engine::markdown::{AutoformatOptions, FormatKind, UnknownCriterion};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid disabled_criteria in config file at {config_path}: {source}")]
    ConfigCriterionError {
        config_path: PathBuf,
        source: UnknownCriterion,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Give up on a sweep after this many restarts; unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_restarts: Option<usize>,
    pub inline_formatting: bool,
    pub horizontal_rules: bool,
    pub disabled_criteria: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let options = AutoformatOptions::default();
        Self {
            max_restarts: options.max_restarts,
            inline_formatting: options.inline_formatting,
            horizontal_rules: options.horizontal_rules,
            disabled_criteria: options.disabled_criteria,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config
            .validate()
            .map_err(|source| ConfigError::ConfigCriterionError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-autoformat");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `~` and environment variables in a user-supplied path.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    /// Every disabled criterion must name a known rule.
    pub fn validate(&self) -> Result<(), UnknownCriterion> {
        for name in &self.disabled_criteria {
            name.parse::<FormatKind>()?;
        }
        Ok(())
    }

    pub fn to_options(&self) -> AutoformatOptions {
        AutoformatOptions::from(self)
    }
}

impl From<&Config> for AutoformatOptions {
    fn from(config: &Config) -> Self {
        AutoformatOptions {
            max_restarts: config.max_restarts,
            inline_formatting: config.inline_formatting,
            horizontal_rules: config.horizontal_rules,
            disabled_criteria: config.disabled_criteria.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-autoformat/config.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            max_restarts: Some(500),
            inline_formatting: false,
            horizontal_rules: true,
            disabled_criteria: vec!["italic".to_string()],
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("max_restarts = 10\n").unwrap();

        assert_eq!(config.max_restarts, Some(10));
        assert!(config.inline_formatting);
        assert!(config.horizontal_rules);
        assert!(config.disabled_criteria.is_empty());
    }

    #[test]
    fn test_default_config_matches_default_options() {
        assert_eq!(Config::default().to_options(), AutoformatOptions::default());
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("AUTOFORMAT_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$AUTOFORMAT_TEST_VAR/config.toml");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/config.toml")));

        unsafe {
            env::remove_var("AUTOFORMAT_TEST_VAR");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            max_restarts: None,
            inline_formatting: true,
            horizontal_rules: false,
            disabled_criteria: vec!["quote".to_string(), "bold".to_string()],
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_parse_error_carries_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "inline_formatting = \"yes\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains(&*config_file.to_string_lossy()));
    }

    #[test]
    fn test_unknown_disabled_criterion_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "disabled_criteria = [\"heading\", \"tables\"]\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        match err {
            ConfigError::ConfigCriterionError { source, .. } => {
                assert_eq!(source, UnknownCriterion("tables".to_string()));
            }
            other => panic!("expected criterion error, got {other:?}"),
        }
    }

    #[test]
    fn test_options_from_config() {
        let config = Config {
            max_restarts: Some(3),
            inline_formatting: false,
            horizontal_rules: false,
            disabled_criteria: vec!["heading".to_string()],
        };

        let options = AutoformatOptions::from(&config);

        assert_eq!(options.max_restarts, Some(3));
        assert!(!options.inline_formatting);
        assert!(!options.horizontal_rules);
        assert_eq!(options.catalog().len(), FormatKind::ALL.len() - 1);
    }
}
