// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};

use super::payload::SaveItemRequest;
use super::{ItemError, require_access, require_user};
use crate::app_state::AppState;
use crate::modulestore::{Location, merge_metadata};

/// Applies whichever of `data`, `children` and `metadata` were supplied.
/// Metadata is merged into the stored map so keys the editor never shows survive.
pub async fn save_item(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<SaveItemRequest>,
) -> Result<HttpResponse, ItemError> {
    let user = require_user(&req)?;
    let payload = payload.into_inner();
    let location = Location::parse(&payload.id)?;
    require_access(&state, &user, &location)?;

    let store = state.store.as_ref();

    if let Some(data) = payload.data {
        store.update_item(&location, data)?;
    }

    // An empty list is a real update: the last child was removed.
    if let Some(children) = payload.children {
        store.update_children(&location, children)?;
    }

    if let Some(posted) = payload.metadata {
        let mut metadata = store.get_item(&location)?.metadata;
        merge_metadata(&mut metadata, &posted);
        store.update_metadata(&location, metadata)?;
    }

    log::info!("{} saved {}", user.username, location.url());
    Ok(HttpResponse::Ok().finish())
}
