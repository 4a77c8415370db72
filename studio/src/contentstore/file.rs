// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

use super::{ContentError, ContentLocation, ContentStore, StaticContent};
use crate::util::write_atomically;

const SIDECAR_DIR: &str = ".meta";

/// Per-asset metadata kept next to the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssetSidecar {
    mime: String,
}

/// Assets on disk under `{root}/{org}/{course}/{filename}`, with the saved
/// content type in `{org}/{course}/.meta/{filename}.ron`.
#[derive(Debug, Clone)]
pub struct FileContentStore {
    root: PathBuf,
}

impl FileContentStore {
    pub fn new(root: PathBuf) -> Result<Self, ContentError> {
        if root.as_os_str().is_empty() {
            return Err(ContentError::FileError(
                "Content store root is empty".to_string(),
            ));
        }
        std::fs::create_dir_all(&root).map_err(|e| {
            ContentError::FileError(format!("Failed to create {}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    fn course_dir(&self, location: &ContentLocation) -> PathBuf {
        self.root.join(&location.org).join(&location.course)
    }

    fn path_for(&self, location: &ContentLocation) -> PathBuf {
        self.course_dir(location).join(&location.filename)
    }

    fn sidecar_path_for(&self, location: &ContentLocation) -> PathBuf {
        self.course_dir(location)
            .join(SIDECAR_DIR)
            .join(format!("{}.ron", location.filename))
    }

    fn write_sidecar(&self, location: &ContentLocation, mime: &str) -> Result<(), ContentError> {
        let path = self.sidecar_path_for(location);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ContentError::FileError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let sidecar = AssetSidecar {
            mime: mime.to_string(),
        };
        let content = ron::ser::to_string_pretty(&sidecar, ron::ser::PrettyConfig::new())
            .map_err(|e| ContentError::FileError(format!("Failed to encode sidecar: {}", e)))?;
        write_atomically(&path, content.as_bytes()).map_err(|e| {
            ContentError::FileError(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Saved content type, or a guess from the file name when the sidecar is
    /// missing or unreadable.
    fn content_type_for(&self, location: &ContentLocation) -> String {
        let path = self.sidecar_path_for(location);
        match std::fs::read_to_string(&path) {
            Ok(raw) => match ron::from_str::<AssetSidecar>(&raw) {
                Ok(sidecar) if !sidecar.mime.trim().is_empty() => return sidecar.mime,
                Ok(_) => log::warn!("Sidecar {} has no mime", path.display()),
                Err(err) => log::warn!("Sidecar {} unreadable: {}", path.display(), err),
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => log::warn!("Sidecar {} unreadable: {}", path.display(), err),
        }
        mime_guess::from_path(&location.filename)
            .first_or_octet_stream()
            .to_string()
    }
}

impl ContentStore for FileContentStore {
    fn save(&self, content: StaticContent) -> Result<(), ContentError> {
        let path = self.path_for(&content.location);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ContentError::FileError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        write_atomically(&path, &content.data).map_err(|e| {
            ContentError::FileError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        self.write_sidecar(&content.location, &content.content_type)?;
        log::debug!("Stored asset {} ({})", content.location, content.content_type);
        Ok(())
    }

    fn find(&self, location: &ContentLocation) -> Result<StaticContent, ContentError> {
        let path = self.path_for(location);
        match std::fs::read(&path) {
            Ok(data) => Ok(StaticContent {
                location: location.clone(),
                content_type: self.content_type_for(location),
                data,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(ContentError::NotFound(location.to_string()))
            }
            Err(err) => Err(ContentError::FileError(format!(
                "Failed to read {}: {}",
                path.display(),
                err
            ))),
        }
    }

    fn delete(&self, location: &ContentLocation) -> Result<(), ContentError> {
        let path = self.path_for(location);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ContentError::NotFound(location.to_string()));
            }
            Err(err) => {
                return Err(ContentError::FileError(format!(
                    "Failed to remove {}: {}",
                    path.display(),
                    err
                )));
            }
        }

        let sidecar = self.sidecar_path_for(location);
        if let Err(err) = std::fs::remove_file(&sidecar)
            && err.kind() != io::ErrorKind::NotFound
        {
            log::warn!("Failed to remove sidecar {}: {}", sidecar.display(), err);
        }
        Ok(())
    }
}
