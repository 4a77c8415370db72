// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::config::ValidatedConfig;
use crate::contentstore::{ContentStore, FileContentStore};
use crate::iam::{CourseAccess, RoleAccess};
use crate::modulestore::{Category, ModuleStore, StoreError, YamlModuleStore};
use crate::runtime_paths::RuntimePaths;
use crate::subtitles::{SubtitleFetcher, YoutubeSubtitleFetcher};

pub struct AppState {
    pub store: Arc<dyn ModuleStore>,
    pub fetcher: Arc<dyn SubtitleFetcher>,
    pub access: Arc<dyn CourseAccess>,
    /// Categories whose payload may name YouTube caption tracks.
    pub video_categories: Vec<Category>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ModuleStore>,
        fetcher: Arc<dyn SubtitleFetcher>,
        access: Arc<dyn CourseAccess>,
        video_categories: Vec<Category>,
    ) -> Self {
        Self {
            store,
            fetcher,
            access,
            video_categories,
        }
    }

    /// Wires the file-backed stores under the runtime root and the YouTube fetcher.
    pub fn from_runtime(
        config: &ValidatedConfig,
        runtime_paths: &RuntimePaths,
    ) -> Result<Self, StoreError> {
        let store: Arc<dyn ModuleStore> = Arc::new(YamlModuleStore::open(
            runtime_paths.modulestore_file.clone(),
        )?);
        let content: Arc<dyn ContentStore> = Arc::new(
            FileContentStore::new(runtime_paths.assets_dir.clone())
                .map_err(|e| StoreError::FileError(e.to_string()))?,
        );
        let fetcher = Arc::new(YoutubeSubtitleFetcher::from_config(
            &config.subtitles,
            content.clone(),
        ));

        Ok(Self::new(
            store,
            fetcher,
            Arc::new(RoleAccess),
            config.subtitles.video_categories.clone(),
        ))
    }

    pub fn is_video_category(&self, category: &Category) -> bool {
        self.video_categories.contains(category)
    }
}
