// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::memory::{
    ItemTable, table_clone, table_create, table_delete, table_get, table_get_mut, table_parents,
};
use super::{Item, Location, Metadata, ModuleStore, StoreError};
use crate::util::write_atomically;

/// Module store persisted as a YAML list of items. Every mutation rewrites the
/// file; the in-memory table only changes once the write succeeded.
#[derive(Debug)]
pub struct YamlModuleStore {
    path: PathBuf,
    items: RwLock<ItemTable>,
}

impl YamlModuleStore {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if path.as_os_str().is_empty() {
            return Err(StoreError::FileError(
                "Module store path is empty".to_string(),
            ));
        }

        let table = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                StoreError::FileError(format!("Failed to read {}: {}", path.display(), e))
            })?;
            Self::parse_items(&content)?
        } else {
            let table = ItemTable::new();
            Self::persist_to(&path, &table)?;
            log::info!("Created empty module store at {}", path.display());
            table
        };

        log::debug!("Loaded {} item(s) from {}", table.len(), path.display());
        Ok(Self {
            path,
            items: RwLock::new(table),
        })
    }

    fn parse_items(content: &str) -> Result<ItemTable, StoreError> {
        if content.trim().is_empty() {
            return Ok(ItemTable::new());
        }
        let items: Vec<Item> = serde_yaml::from_str(content)
            .map_err(|e| StoreError::ParseError(format!("Failed to parse items: {}", e)))?;
        let mut table = ItemTable::new();
        for item in items {
            table_create(&mut table, item)?;
        }
        Ok(table)
    }

    fn persist_to(path: &Path, table: &ItemTable) -> Result<(), StoreError> {
        let items: Vec<&Item> = table.values().collect();
        let content = serde_yaml::to_string(&items)
            .map_err(|e| StoreError::ParseError(format!("Failed to serialize items: {}", e)))?;
        write_atomically(path, content.as_bytes()).map_err(|e| {
            StoreError::FileError(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut ItemTable) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.write();
        let mut next = guard.clone();
        let outcome = apply(&mut next)?;
        Self::persist_to(&self.path, &next)?;
        *guard = next;
        Ok(outcome)
    }

    fn read(&self) -> RwLockReadGuard<'_, ItemTable> {
        match self.items.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("YamlModuleStore lock poisoned on read; recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, ItemTable> {
        match self.items.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("YamlModuleStore lock poisoned on write; recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl ModuleStore for YamlModuleStore {
    fn get_item(&self, location: &Location) -> Result<Item, StoreError> {
        table_get(&self.read(), location)
    }

    fn create_item(&self, item: Item) -> Result<(), StoreError> {
        self.mutate(|table| table_create(table, item))
    }

    fn update_item(&self, location: &Location, data: Value) -> Result<(), StoreError> {
        self.mutate(|table| {
            table_get_mut(table, location)?.data = data;
            Ok(())
        })
    }

    fn update_children(
        &self,
        location: &Location,
        children: Vec<String>,
    ) -> Result<(), StoreError> {
        self.mutate(|table| {
            table_get_mut(table, location)?.children = children;
            Ok(())
        })
    }

    fn update_metadata(&self, location: &Location, metadata: Metadata) -> Result<(), StoreError> {
        self.mutate(|table| {
            table_get_mut(table, location)?.metadata = metadata;
            Ok(())
        })
    }

    fn clone_item(&self, source: &Location, dest: &Location) -> Result<Item, StoreError> {
        self.mutate(|table| table_clone(table, source, dest))
    }

    fn delete_item(
        &self,
        location: &Location,
        delete_all_versions: bool,
    ) -> Result<(), StoreError> {
        log::debug!(
            "Deleting {} (all versions: {})",
            location.url(),
            delete_all_versions
        );
        self.mutate(|table| table_delete(table, location))
    }

    fn get_parent_locations(&self, location: &Location) -> Result<Vec<Location>, StoreError> {
        Ok(table_parents(&self.read(), location))
    }
}
