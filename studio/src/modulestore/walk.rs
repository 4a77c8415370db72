// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::collections::HashSet;

use super::{Item, Location, ModuleStore, StoreError};

/// Visits every descendant of `root` and then `root` itself, children before
/// parents. Child URLs that do not parse or do not resolve are skipped.
pub fn walk_post_order<F>(
    store: &dyn ModuleStore,
    root: &Item,
    visit: &mut F,
) -> Result<(), StoreError>
where
    F: FnMut(&Item) -> Result<(), StoreError>,
{
    let mut seen = HashSet::new();
    walk_inner(store, root, visit, &mut seen)
}

fn walk_inner<F>(
    store: &dyn ModuleStore,
    item: &Item,
    visit: &mut F,
    seen: &mut HashSet<String>,
) -> Result<(), StoreError>
where
    F: FnMut(&Item) -> Result<(), StoreError>,
{
    // Guards against cycles in hand-edited stores.
    if !seen.insert(item.location.url()) {
        return Ok(());
    }

    for child_url in &item.children {
        let child_location = match Location::parse(child_url) {
            Ok(location) => location,
            Err(err) => {
                log::warn!("Skipping child of {}: {}", item.location.url(), err);
                continue;
            }
        };
        match store.get_item(&child_location) {
            Ok(child) => walk_inner(store, &child, visit, seen)?,
            Err(StoreError::ItemNotFound(url)) => {
                log::warn!(
                    "Skipping dangling child {} of {}",
                    url,
                    item.location.url()
                );
            }
            Err(err) => return Err(err),
        }
    }

    visit(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulestore::MemoryModuleStore;

    fn loc(url: &str) -> Location {
        Location::parse(url).unwrap()
    }

    #[test]
    fn visits_children_before_parents() {
        let store = MemoryModuleStore::from_items(vec![
            Item::new(loc("i4x://o/c/chapter/ch")).with_children(vec![
                "i4x://o/c/sequential/s1".to_string(),
                "i4x://o/c/sequential/gone".to_string(),
                "not a location".to_string(),
            ]),
            Item::new(loc("i4x://o/c/sequential/s1"))
                .with_children(vec!["i4x://o/c/html/h1".to_string()]),
            Item::new(loc("i4x://o/c/html/h1")),
        ]);
        let root = store.get_item(&loc("i4x://o/c/chapter/ch")).unwrap();

        let mut visited = Vec::new();
        walk_post_order(&store, &root, &mut |item: &Item| {
            visited.push(item.location.name.clone());
            Ok(())
        })
        .unwrap();

        assert_eq!(visited, vec!["h1", "s1", "ch"]);
    }

    #[test]
    fn stops_on_cycles() {
        let store = MemoryModuleStore::from_items(vec![
            Item::new(loc("i4x://o/c/vertical/a"))
                .with_children(vec!["i4x://o/c/vertical/b".to_string()]),
            Item::new(loc("i4x://o/c/vertical/b"))
                .with_children(vec!["i4x://o/c/vertical/a".to_string()]),
        ]);
        let root = store.get_item(&loc("i4x://o/c/vertical/a")).unwrap();

        let mut count = 0;
        walk_post_order(&store, &root, &mut |_: &Item| {
            count += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(count, 2);
    }
}
