//! # configs
//!
//! Layered application configuration: built-in defaults, then an optional
//! `campus-hub.toml`, then `CAMPUS__*` environment variables (a `.env` file
//! is honoured through dotenvy).
//!
//! Example: `CAMPUS__SESSION__DISPLAY_NAME="Juan Méndez"`,
//! `CAMPUS__FILTERS__FRIENDS="Ana García,Carlos Mendoza"`.

use std::path::Path;

use chrono::NaiveDate;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use ch_core::session::{Session, Theme};

pub const DEFAULT_CONFIG_FILE: &str = "campus-hub.toml";
pub const ENV_PREFIX: &str = "CAMPUS";

/// UTC offsets outside ±14h do not exist.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    pub display_name: String,
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterConfig {
    pub popular_threshold: u32,
    pub friends: Vec<String>,
    pub history_cutoff: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UiConfig {
    pub comment_preview: usize,
    pub dark_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MockConfig {
    /// Seed of the generated sample comments.
    pub comment_seed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub filters: FilterConfig,
    pub ui: UiConfig,
    pub mock: MockConfig,
    /// Emit logs as JSON lines instead of the human format.
    pub log_json: bool,
}

impl AppConfig {
    /// Builder preloaded with every default. Callers stack their sources on top.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("session.display_name", "Laura Gómez")?
            .set_default("session.utc_offset_minutes", 0)?
            .set_default("filters.popular_threshold", 20)?
            .set_default("filters.friends", vec!["Ana García", "Carlos Mendoza"])?
            .set_default("filters.history_cutoff", "2025-10-15")?
            .set_default("ui.comment_preview", 3)?
            .set_default("ui.dark_mode", false)?
            .set_default("mock.comment_seed", 42)?
            .set_default("log_json", false)?)
    }

    /// Loads `.env`, the optional file at `path`, then the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!(path = %env_file.display(), "loaded .env");
        }
        let path = path.as_ref();
        let builder = Self::defaults()?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("filters.friends"),
            );
        let cfg = Self::finish(builder)?;
        debug!(path = %path.display(), user = %cfg.session.display_name, "configuration loaded");
        Ok(cfg)
    }

    /// Defaults overlaid with a TOML document. Used by tests and fixtures.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::finish(Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let cfg: AppConfig = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.display_name.trim().is_empty() {
            return Err(ConfigError::Invalid("session.display_name is empty".to_string()));
        }
        if self.session.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "session.utc_offset_minutes out of range: {}",
                self.session.utc_offset_minutes
            )));
        }
        if self.ui.comment_preview == 0 {
            return Err(ConfigError::Invalid("ui.comment_preview must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn session(&self) -> Session {
        Session::new(
            self.session.display_name.clone(),
            self.session.utc_offset_minutes,
        )
    }

    pub fn theme(&self) -> Theme {
        Theme {
            dark_mode: self.ui.dark_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sample_app() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.session.display_name, "Laura Gómez");
        assert_eq!(cfg.filters.popular_threshold, 20);
        assert_eq!(cfg.filters.friends, vec!["Ana García", "Carlos Mendoza"]);
        assert_eq!(cfg.filters.history_cutoff, NaiveDate::from_ymd_opt(2025, 10, 15).unwrap());
        assert_eq!(cfg.ui.comment_preview, 3);
        assert!(!cfg.log_json);
        assert_eq!(cfg.theme(), Theme::light());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            log_json = true

            [session]
            display_name = "Juan Méndez"
            utc_offset_minutes = -240

            [ui]
            dark_mode = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.session().display_name, "Juan Méndez");
        assert_eq!(cfg.session().utc_offset_minutes, -240);
        assert_eq!(cfg.theme(), Theme::dark());
        assert_eq!(cfg.ui.comment_preview, 3);
        assert!(cfg.log_json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppConfig::from_toml("[ui]\ncomment_preview = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AppConfig::from_toml("[session]\nutc_offset_minutes = 1000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let cfg = AppConfig::load("does-not-exist.toml").unwrap();
        assert!(cfg.filters.popular_threshold > 0);
    }
}
