// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};

use super::payload::DeleteItemRequest;
use super::{ItemError, require_access, require_user};
use crate::app_state::AppState;
use crate::modulestore::{Location, ModuleStore, walk_post_order};

pub async fn delete_item(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<DeleteItemRequest>,
) -> Result<HttpResponse, ItemError> {
    let user = require_user(&req)?;
    let payload = payload.into_inner();
    let location = Location::parse(&payload.id)?;
    require_access(&state, &user, &location)?;

    let store = state.store.as_ref();
    let item = store.get_item(&location)?;
    let all_versions = payload.delete_all_versions;

    if payload.delete_children {
        walk_post_order(store, &item, &mut |visited| {
            store.delete_item(&visited.location, all_versions)
        })?;
    } else {
        store.delete_item(&item.location, all_versions)?;
    }

    if all_versions {
        detach_from_parents(store, &location)?;
    }

    log::info!(
        "{} deleted {} (children: {}, all versions: {})",
        user.username,
        location.url(),
        payload.delete_children,
        all_versions
    );
    Ok(HttpResponse::Ok().finish())
}

/// Drops the item's URL from every parent that still lists it.
fn detach_from_parents(store: &dyn ModuleStore, location: &Location) -> Result<(), ItemError> {
    let url = location.url();
    for parent_location in store.get_parent_locations(location)? {
        let parent = store.get_item(&parent_location)?;
        if !parent.children.contains(&url) {
            continue;
        }
        let children = parent
            .children
            .into_iter()
            .filter(|child| child != &url)
            .collect();
        store.update_children(&parent.location, children)?;
    }
    Ok(())
}
