// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

use crate::modulestore::{InvalidLocation, StoreError};

#[derive(Debug)]
pub enum ItemError {
    Unauthenticated,
    PermissionDenied,
    InvalidLocation(InvalidLocation),
    NotFound(String),
    Store(StoreError),
}

impl ItemError {
    fn code(&self) -> &'static str {
        match self {
            ItemError::Unauthenticated => "unauthenticated",
            ItemError::PermissionDenied => "permission_denied",
            ItemError::InvalidLocation(_) => "invalid_location",
            ItemError::NotFound(_) => "not_found",
            ItemError::Store(_) => "store_error",
        }
    }
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::Unauthenticated => write!(f, "Login required"),
            ItemError::PermissionDenied => write!(f, "No edit access to this course"),
            ItemError::InvalidLocation(err) => write!(f, "{}", err),
            ItemError::NotFound(url) => write!(f, "Item not found: {}", url),
            ItemError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ItemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ItemError::InvalidLocation(err) => Some(err),
            ItemError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidLocation> for ItemError {
    fn from(err: InvalidLocation) -> Self {
        ItemError::InvalidLocation(err)
    }
}

impl From<StoreError> for ItemError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ItemNotFound(url) => ItemError::NotFound(url),
            other => ItemError::Store(other),
        }
    }
}

impl ResponseError for ItemError {
    fn status_code(&self) -> StatusCode {
        match self {
            ItemError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ItemError::PermissionDenied => StatusCode::FORBIDDEN,
            ItemError::InvalidLocation(_) => StatusCode::BAD_REQUEST,
            ItemError::NotFound(_) => StatusCode::NOT_FOUND,
            ItemError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ItemError::Store(err) => {
                log::error!("Module store failure: {}", err);
                "Internal store error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.code(),
            "message": message,
        }))
    }
}
