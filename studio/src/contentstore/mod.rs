// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::fmt;

mod file;
mod memory;

pub use file::FileContentStore;
pub use memory::MemoryContentStore;

pub const CONTENT_TAG: &str = "c4x";
pub const ASSET_CATEGORY: &str = "asset";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    NotFound(String),
    InvalidName(String),
    FileError(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::NotFound(location) => write!(f, "Content not found: {}", location),
            ContentError::InvalidName(name) => write!(f, "Invalid content name: {}", name),
            ContentError::FileError(msg) => write!(f, "Content file error: {}", msg),
        }
    }
}

impl std::error::Error for ContentError {}

/// Course asset address, rendered as `/c4x/{org}/{course}/asset/{filename}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentLocation {
    pub org: String,
    pub course: String,
    pub filename: String,
}

impl ContentLocation {
    pub fn compute(org: &str, course: &str, filename: &str) -> Result<Self, ContentError> {
        for part in [org, course, filename] {
            if !is_safe_segment(part) {
                return Err(ContentError::InvalidName(part.to_string()));
            }
        }
        Ok(Self {
            org: org.to_string(),
            course: course.to_string(),
            filename: filename.to_string(),
        })
    }
}

impl fmt::Display for ContentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{}/{}/{}/{}/{}",
            CONTENT_TAG, self.org, self.course, ASSET_CATEGORY, self.filename
        )
    }
}

/// Segments end up as path components, so only a conservative charset is
/// allowed. Leading dots are reserved for store metadata.
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('.')
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticContent {
    pub location: ContentLocation,
    pub content_type: String,
    pub data: Vec<u8>,
}

pub trait ContentStore: Send + Sync {
    fn save(&self, content: StaticContent) -> Result<(), ContentError>;
    fn find(&self, location: &ContentLocation) -> Result<StaticContent, ContentError>;
    fn delete(&self, location: &ContentLocation) -> Result<(), ContentError>;
}
