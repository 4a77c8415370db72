// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde_json::Value;
use std::fmt;

pub mod category;
pub mod item;
pub mod location;
mod memory;
mod walk;
mod yaml_store;

pub use category::Category;
pub use item::{DISPLAY_NAME_KEY, Item, Metadata, merge_metadata};
pub use location::{InvalidLocation, Location};
pub use memory::MemoryModuleStore;
pub use walk::walk_post_order;
pub use yaml_store::YamlModuleStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    ItemNotFound(String),
    DuplicateItem(String),
    FileError(String),
    ParseError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ItemNotFound(url) => write!(f, "Item not found: {}", url),
            StoreError::DuplicateItem(url) => write!(f, "Item already exists: {}", url),
            StoreError::FileError(msg) => write!(f, "Module store file error: {}", msg),
            StoreError::ParseError(msg) => write!(f, "Module store parse error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Hierarchical item storage. Every call is atomic on its own; callers get no
/// transaction across calls.
pub trait ModuleStore: Send + Sync {
    fn get_item(&self, location: &Location) -> Result<Item, StoreError>;
    fn create_item(&self, item: Item) -> Result<(), StoreError>;
    fn update_item(&self, location: &Location, data: Value) -> Result<(), StoreError>;
    fn update_children(&self, location: &Location, children: Vec<String>)
    -> Result<(), StoreError>;
    fn update_metadata(&self, location: &Location, metadata: Metadata) -> Result<(), StoreError>;
    /// Copies `source` to the unused location `dest` and returns the copy.
    fn clone_item(&self, source: &Location, dest: &Location) -> Result<Item, StoreError>;
    fn delete_item(&self, location: &Location, delete_all_versions: bool)
    -> Result<(), StoreError>;
    /// Every item whose children list references `location`.
    fn get_parent_locations(&self, location: &Location) -> Result<Vec<Location>, StoreError>;
}
