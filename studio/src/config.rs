// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::modulestore::Category;

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const MIN_JWT_SECRET_CHARS: usize = 16;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    4
}

impl ServerConfig {
    pub fn address_tuple(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_jwt_issuer")]
    pub issuer: String,
    #[serde(default = "default_jwt_audience")]
    pub audience: String,
    #[serde(default = "default_jwt_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_jwt_expiration_hours")]
    pub expiration_hours: u64,
}

fn default_jwt_issuer() -> String {
    "studio".to_string()
}

fn default_jwt_audience() -> String {
    "studio-users".to_string()
}

fn default_jwt_cookie_name() -> String {
    "studio_auth".to_string()
}

fn default_jwt_expiration_hours() -> u64 {
    12
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SubtitlesConfig {
    #[serde(default = "default_youtube_url")]
    pub youtube_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Categories whose items carry a `youtube` attribute.
    #[serde(default = "default_video_categories")]
    pub video_categories: Vec<Category>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SubtitlesConfig {
    fn default() -> Self {
        Self {
            youtube_url: default_youtube_url(),
            language: default_language(),
            video_categories: default_video_categories(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_youtube_url() -> String {
    "http://video.google.com/timedtext".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_video_categories() -> Vec<Category> {
    vec![Category::Video, Category::VideoAlpha]
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub subtitles: SubtitlesConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub subtitles: SubtitlesConfig,
    pub app: AppConfig,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join(CONFIG_FILE_NAME);
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::parse(&config_content).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                e
            ))
        })
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Loads and validates configuration at startup. If validation fails, the application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        Self::load(root)?.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        Self::validate_server(&self.server)?;
        Self::validate_auth(&self.auth)?;
        Self::validate_logging(&self.logging)?;
        Self::validate_subtitles(&self.subtitles)?;

        Ok(ValidatedConfig {
            server: self.server,
            auth: self.auth,
            logging: self.logging,
            subtitles: self.subtitles,
            app: self.app,
        })
    }

    fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
        if server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Server host must not be empty".to_string(),
            ));
        }
        if server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "Server workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_auth(auth: &AuthConfig) -> Result<(), ConfigError> {
        if auth.jwt_secret.chars().count() < MIN_JWT_SECRET_CHARS {
            return Err(ConfigError::ValidationError(format!(
                "JWT secret must be at least {} characters",
                MIN_JWT_SECRET_CHARS
            )));
        }
        if auth.expiration_hours < 1 {
            return Err(ConfigError::ValidationError(format!(
                "JWT expiration_hours must be at least 1, got: {}",
                auth.expiration_hours
            )));
        }
        if auth.cookie_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "JWT cookie_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        match logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::ValidationError(format!(
                "Logging level must be one of trace, debug, info, warn, error; got: {}",
                other
            ))),
        }
    }

    fn validate_subtitles(subtitles: &SubtitlesConfig) -> Result<(), ConfigError> {
        let url = &subtitles.youtube_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(
                "Subtitles youtube_url must be a fully qualified URL starting with http:// or https://".to_string(),
            ));
        }
        if subtitles.language.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Subtitles language must not be empty".to_string(),
            ));
        }
        if subtitles.video_categories.is_empty() {
            return Err(ConfigError::ValidationError(
                "Subtitles video_categories must list at least one category".to_string(),
            ));
        }
        if !(1..=120).contains(&subtitles.timeout_seconds) {
            return Err(ConfigError::ValidationError(format!(
                "Subtitles timeout_seconds must be between 1 and 120, got: {}",
                subtitles.timeout_seconds
            )));
        }
        Ok(())
    }
}

impl ValidatedConfig {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        }
    }
}
