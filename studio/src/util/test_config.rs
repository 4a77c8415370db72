// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use crate::config::{
    AppConfig, AuthConfig, LoggingConfig, ServerConfig, SubtitlesConfig, ValidatedConfig,
};
use crate::modulestore::Category;

pub const TEST_JWT_SECRET: &str = "test-secret-0123456789abcdef";

#[derive(Debug, Clone)]
pub struct TestConfigBuilder {
    config: ValidatedConfig,
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ValidatedConfig {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 8001,
                    workers: 1,
                },
                auth: AuthConfig {
                    jwt_secret: TEST_JWT_SECRET.to_string(),
                    issuer: "studio".to_string(),
                    audience: "studio-users".to_string(),
                    cookie_name: "studio_auth".to_string(),
                    expiration_hours: 12,
                },
                logging: LoggingConfig {
                    level: "info".to_string(),
                },
                subtitles: SubtitlesConfig::default(),
                app: AppConfig {
                    name: "Test Studio".to_string(),
                },
            },
        }
    }

    pub fn with_youtube_url(mut self, url: impl Into<String>) -> Self {
        self.config.subtitles.youtube_url = url.into();
        self
    }

    pub fn with_video_categories(mut self, categories: Vec<Category>) -> Self {
        self.config.subtitles.video_categories = categories;
        self
    }

    pub fn build(self) -> ValidatedConfig {
        self.config
    }
}

pub fn test_config() -> ValidatedConfig {
    TestConfigBuilder::new().build()
}
