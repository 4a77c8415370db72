// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::app_state::AppState;
use crate::iam::{AuthRequest, RequireLoginMiddleware, User};
use crate::modulestore::Location;

mod clone;
mod delete;
pub mod error;
mod import;
pub mod payload;
mod save;

pub use error::ItemError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::resource("/save_item")
                .wrap(RequireLoginMiddleware)
                .route(web::post().to(save::save_item)),
        )
        .service(
            web::resource("/clone_item")
                .wrap(RequireLoginMiddleware)
                .route(web::post().to(clone::clone_item)),
        )
        .service(
            web::resource("/delete_item")
                .wrap(RequireLoginMiddleware)
                .route(web::post().to(delete::delete_item)),
        )
        .route("/import_subtitles", web::post().to(import::import_subtitles));
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::debug!("Rejected JSON body on {}: {}", req.path(), err);
        let response = HttpResponse::BadRequest().json(json!({
            "error": "invalid_json",
            "message": err.to_string(),
        }));
        InternalError::from_response(err, response).into()
    })
}

pub(crate) fn require_user(req: &HttpRequest) -> Result<User, ItemError> {
    req.user_info().ok_or(ItemError::Unauthenticated)
}

pub(crate) fn require_access(
    state: &AppState,
    user: &User,
    location: &Location,
) -> Result<(), ItemError> {
    if state.access.has_access(user, location) {
        Ok(())
    } else {
        log::warn!(
            "User {} denied edit access to {}",
            user.username,
            location.url()
        );
        Err(ItemError::PermissionDenied)
    }
}
