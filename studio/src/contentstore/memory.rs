// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{ContentError, ContentLocation, ContentStore, StaticContent};

#[derive(Debug, Default)]
pub struct MemoryContentStore {
    assets: RwLock<HashMap<ContentLocation, StaticContent>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        match self.assets.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentStore for MemoryContentStore {
    fn save(&self, content: StaticContent) -> Result<(), ContentError> {
        let mut guard = match self.assets.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("MemoryContentStore lock poisoned on write; recovering");
                poisoned.into_inner()
            }
        };
        guard.insert(content.location.clone(), content);
        Ok(())
    }

    fn find(&self, location: &ContentLocation) -> Result<StaticContent, ContentError> {
        let guard = match self.assets.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("MemoryContentStore lock poisoned on read; recovering");
                poisoned.into_inner()
            }
        };
        guard
            .get(location)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(location.to_string()))
    }

    fn delete(&self, location: &ContentLocation) -> Result<(), ContentError> {
        let mut guard = match self.assets.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("MemoryContentStore lock poisoned on write; recovering");
                poisoned.into_inner()
            }
        };
        guard
            .remove(location)
            .map(|_| ())
            .ok_or_else(|| ContentError::NotFound(location.to_string()))
    }
}
