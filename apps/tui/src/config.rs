use dotenv::dotenv;
use neighborhood_map_core::debounce::SEARCH_DEBOUNCE;
use neighborhood_map_core::Language;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LOG_FILE: &str = "neighborhood-map.log";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number of milliseconds, got `{value}`")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be one of 1/0, true/false, on/off, got `{value}`")]
    InvalidFlag { var: &'static str, value: String },
}

/// Runtime settings gathered from `.env`, the environment and (through
/// [`crate::cli::CliArgs::apply_env_overrides`]) the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog_path: Option<PathBuf>,
    pub asset_dir: PathBuf,
    /// Raw `DEFAULT_LANGUAGE`; resolved by [`AppConfig::language`] once
    /// logging is up so an unsupported code is reported.
    pub language_code: Option<String>,
    pub search_debounce: Duration,
    pub hide_filtered_markers: bool,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            asset_dir: PathBuf::from("."),
            language_code: None,
            search_debounce: SEARCH_DEBOUNCE,
            hide_filtered_markers: true,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Reads every setting through `lookup`; unset or blank variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let search_debounce = match var("SEARCH_DEBOUNCE_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "SEARCH_DEBOUNCE_MS",
                    value,
                })?,
            None => defaults.search_debounce,
        };

        Ok(Self {
            catalog_path: var("CATALOG_PATH").map(PathBuf::from),
            asset_dir: var("ASSET_DIR").map_or(defaults.asset_dir, PathBuf::from),
            language_code: var("DEFAULT_LANGUAGE").map(|code| code.trim().to_string()),
            search_debounce,
            hide_filtered_markers: parse_flag(
                "HIDE_FILTERED_MARKERS",
                var("HIDE_FILTERED_MARKERS"),
            )?
            .unwrap_or(defaults.hide_filtered_markers),
            log_file: var("LOG_FILE").map_or(defaults.log_file, PathBuf::from),
            debug: parse_flag("DEBUG", var("DEBUG"))?.unwrap_or(defaults.debug),
        })
    }
}

impl AppConfig {
    pub fn language(&self) -> Language {
        self.language_code
            .as_deref()
            .map_or_else(Language::default, Language::from_code_or_default)
    }
}

fn parse_flag(var: &'static str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}

/// Initializes the application configuration
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    // Load environment variables from .env file
    dotenv().ok();
    AppConfig::from_lookup(|name| env::var(name).ok())
}
