// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Item, Location, Metadata, ModuleStore, StoreError};

/// Items keyed by canonical location URL.
pub(super) type ItemTable = BTreeMap<String, Item>;

pub(super) fn table_get(table: &ItemTable, location: &Location) -> Result<Item, StoreError> {
    table
        .get(&location.url())
        .cloned()
        .ok_or_else(|| StoreError::ItemNotFound(location.url()))
}

pub(super) fn table_get_mut<'a>(
    table: &'a mut ItemTable,
    location: &Location,
) -> Result<&'a mut Item, StoreError> {
    table
        .get_mut(&location.url())
        .ok_or_else(|| StoreError::ItemNotFound(location.url()))
}

pub(super) fn table_create(table: &mut ItemTable, item: Item) -> Result<(), StoreError> {
    let url = item.location.url();
    if table.contains_key(&url) {
        return Err(StoreError::DuplicateItem(url));
    }
    table.insert(url, item);
    Ok(())
}

pub(super) fn table_clone(
    table: &mut ItemTable,
    source: &Location,
    dest: &Location,
) -> Result<Item, StoreError> {
    let template = table_get(table, source)?;
    let copy = Item {
        location: Location {
            revision: None,
            ..dest.clone()
        },
        data: template.data,
        metadata: template.metadata,
        children: template.children,
    };
    table_create(table, copy.clone())?;
    Ok(copy)
}

pub(super) fn table_delete(table: &mut ItemTable, location: &Location) -> Result<(), StoreError> {
    table
        .remove(&location.url())
        .map(|_| ())
        .ok_or_else(|| StoreError::ItemNotFound(location.url()))
}

pub(super) fn table_parents(table: &ItemTable, location: &Location) -> Vec<Location> {
    let url = location.url();
    table
        .values()
        .filter(|item| item.children.iter().any(|child| child == &url))
        .map(|item| item.location.clone())
        .collect()
}

/// Module store that lives only as long as the process; a single revision per location.
#[derive(Debug, Default)]
pub struct MemoryModuleStore {
    items: RwLock<ItemTable>,
}

impl MemoryModuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        let table = items
            .into_iter()
            .map(|item| (item.location.url(), item))
            .collect();
        Self {
            items: RwLock::new(table),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, ItemTable> {
        match self.items.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("MemoryModuleStore lock poisoned on read; recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, ItemTable> {
        match self.items.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("MemoryModuleStore lock poisoned on write; recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl ModuleStore for MemoryModuleStore {
    fn get_item(&self, location: &Location) -> Result<Item, StoreError> {
        table_get(&self.read(), location)
    }

    fn create_item(&self, item: Item) -> Result<(), StoreError> {
        table_create(&mut self.write(), item)
    }

    fn update_item(&self, location: &Location, data: Value) -> Result<(), StoreError> {
        table_get_mut(&mut self.write(), location)?.data = data;
        Ok(())
    }

    fn update_children(
        &self,
        location: &Location,
        children: Vec<String>,
    ) -> Result<(), StoreError> {
        table_get_mut(&mut self.write(), location)?.children = children;
        Ok(())
    }

    fn update_metadata(&self, location: &Location, metadata: Metadata) -> Result<(), StoreError> {
        table_get_mut(&mut self.write(), location)?.metadata = metadata;
        Ok(())
    }

    fn clone_item(&self, source: &Location, dest: &Location) -> Result<Item, StoreError> {
        table_clone(&mut self.write(), source, dest)
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
        table_delete(&mut self.write(), location)
    }

    fn get_parent_locations(&self, location: &Location) -> Result<Vec<Location>, StoreError> {
        Ok(table_parents(&self.read(), location))
    }
}
