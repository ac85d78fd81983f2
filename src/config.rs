//! Settings for the `hangar` CLI.
//!
//! Layered with figment: built-in defaults, then the YAML config file, then
//! `HANGAR_*` environment variables, then command-line flags. The result is
//! a plain value handed to the command layer; nothing is global.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{HangarError, Result};
use crate::output::OutputFormat;

/// Prefix of environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "HANGAR_";

/// Token variable. Read verbatim, never parsed as a number or boolean.
pub const TOKEN_ENV: &str = "HANGAR_API_TOKEN";

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// API base URL.
    pub base_url: String,
    /// Bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<Scalar>,
    /// Transport timeout, as seconds or a humantime string ("30s", "1m").
    pub timeout: Scalar,
    /// Output format.
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            timeout: Scalar::Text(humantime::format_duration(DEFAULT_TIMEOUT).to_string()),
            output: OutputFormat::Table,
        }
    }
}

/// A config value that may arrive as a number or a string.
///
/// Environment and YAML values that look numeric are parsed as numbers, so
/// string settings accept both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(u64),
    Text(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFormat>,
}

/// Default config file: `$HOME/.config/hangar/config.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("hangar")
            .join("config.yaml")
    })
}

impl Settings {
    /// Load settings with precedence flags > env > file > defaults.
    ///
    /// `config_file` replaces the default path. A missing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`HangarError::Config`] if a layer holds values of the wrong
    /// shape.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let path = config_file.map(Path::to_path_buf).or_else(default_config_path);

        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
        if let Some(path) = &path {
            tracing::debug!(path = %path.display(), "reading config file");
            figment = figment.merge(Yaml::file(path));
        }

        figment =
            figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config", "log", "api_token"]));
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            figment = figment.merge(Serialized::default("api_token", token));
        }

        let settings: Settings = figment
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(|e| HangarError::Config(e.to_string()))?;

        Ok(settings)
    }

    /// The bearer token, if one is configured and non-empty.
    pub fn token(&self) -> Option<String> {
        self.api_token
            .clone()
            .map(Scalar::into_string)
            .filter(|t| !t.is_empty())
    }

    /// Parse the timeout. Bare numbers are seconds.
    ///
    /// # Errors
    ///
    /// Returns [`HangarError::Config`] for an unparseable duration.
    pub fn timeout(&self) -> Result<Duration> {
        parse_timeout(&self.timeout.clone().into_string())
    }

    /// Build the client configuration.
    pub fn client_config(&self) -> Result<ClientConfig> {
        Ok(ClientConfig {
            base_url: self.base_url.clone(),
            token: self.token(),
            timeout: self.timeout()?,
            http: None,
        })
    }
}

/// Parse a timeout given as seconds or as a humantime duration.
pub fn parse_timeout(value: &str) -> Result<Duration> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(value)
        .map_err(|e| HangarError::Config(format!("invalid timeout '{value}': {e}")))
}
