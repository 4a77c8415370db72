// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use serde_json::json;

use super::payload::ImportSubtitlesRequest;
use super::{ItemError, require_access};
use crate::app_state::AppState;
use crate::iam::AuthRequest;
use crate::modulestore::{Item, Location, StoreError};
use crate::subtitles::TimingMap;

/// Answers `{"status": "success"}` or `{"status": "fail"}` with 200. Only a
/// caller without edit access to an existing item gets an error status, so
/// the body is read leniently instead of through the JSON extractor.
pub async fn import_subtitles(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ItemError> {
    let form_encoded = req.content_type() == "application/x-www-form-urlencoded";
    let payload = ImportSubtitlesRequest::from_body(&body, form_encoded);
    let imported = import(&req, &state, &payload).await?;
    let status = if imported { "success" } else { "fail" };
    Ok(HttpResponse::Ok().json(json!({ "status": status })))
}

async fn import(
    req: &HttpRequest,
    state: &AppState,
    payload: &ImportSubtitlesRequest,
) -> Result<bool, ItemError> {
    let Some(id) = payload.id() else {
        log::error!("Subtitle import request without an \"id\" property");
        return Ok(false);
    };

    let location = match Location::parse(id) {
        Ok(location) => location,
        Err(err) => {
            log::error!("Cannot find item for subtitle import: {}", err);
            return Ok(false);
        }
    };
    let item = match state.store.get_item(&location) {
        Ok(item) => item,
        Err(StoreError::ItemNotFound(url)) => {
            log::error!("Cannot find item for subtitle import: {}", url);
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };

    match req.user_info() {
        Some(user) => require_access(state, &user, &location)?,
        None => {
            log::warn!("Anonymous subtitle import for {} rejected", location.url());
            return Err(ItemError::PermissionDenied);
        }
    }

    if !state.is_video_category(&item.location.category) {
        log::error!(
            "Subtitles are not supported for {} items ({})",
            item.location.category,
            location.url()
        );
        return Ok(false);
    }

    let timing = match youtube_timing(&item) {
        Ok(timing) => timing,
        Err(reason) => {
            log::error!("{} for {}", reason, location.url());
            return Ok(false);
        }
    };

    Ok(state
        .fetcher
        .fetch(&timing, &item.location.org, &item.location.course)
        .await)
}

/// Reads the speed to YouTube id map from the `youtube` attribute of the
/// item's XML root element.
fn youtube_timing(item: &Item) -> Result<TimingMap, String> {
    let source = item
        .data_text()
        .ok_or_else(|| "Item data is not XML text".to_string())?;
    let document = roxmltree::Document::parse(source)
        .map_err(|e| format!("Cannot parse source XML ({})", e))?;

    let youtube = document
        .root_element()
        .attribute("youtube")
        .filter(|value| !value.is_empty())
        .ok_or_else(|| "Missing or blank \"youtube\" attribute".to_string())?;

    TimingMap::parse(youtube).map_err(|e| format!("Bad \"youtube\" attribute: {}", e))
}
