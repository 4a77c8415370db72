// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use uuid::Uuid;

use super::payload::CloneItemRequest;
use super::{ItemError, require_access, require_user};
use crate::app_state::AppState;
use crate::modulestore::Location;

pub async fn clone_item(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<CloneItemRequest>,
) -> Result<HttpResponse, ItemError> {
    let user = require_user(&req)?;
    let payload = payload.into_inner();
    let parent_location = Location::parse(&payload.parent_location)?;
    let template = Location::parse(&payload.template)?;
    require_access(&state, &user, &parent_location)?;

    let store = state.store.as_ref();
    let parent = store.get_item(&parent_location)?;
    let dest = parent_location.with_category_and_name(
        template.category.clone(),
        Uuid::new_v4().simple().to_string(),
    );

    let mut new_item = store.clone_item(&template, &dest)?;
    if let Some(display_name) = payload.display_name {
        new_item.set_display_name(display_name);
    }
    store.update_metadata(&new_item.location, new_item.metadata.clone())?;

    if !new_item.location.category.is_detached() {
        let mut children = parent.children;
        children.push(new_item.location.url());
        store.update_children(&parent.location, children)?;
    }

    log::info!(
        "{} cloned {} into {}",
        user.username,
        template.url(),
        dest.url()
    );
    Ok(HttpResponse::Ok().json(json!({ "id": dest.url() })))
}
