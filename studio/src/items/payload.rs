// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::modulestore::Metadata;

// An explicit `null` and an absent field both deserialize to `None`.

#[derive(Debug, Deserialize)]
pub struct SaveItemRequest {
    pub id: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub children: Option<Vec<String>>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Deserialize)]
pub struct CloneItemRequest {
    pub parent_location: String,
    pub template: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItemRequest {
    pub id: String,
    #[serde(default)]
    pub delete_children: bool,
    #[serde(default)]
    pub delete_all_versions: bool,
}

/// Missing or non-string ids are a soft failure, not a 400.
#[derive(Debug, Default, Deserialize)]
pub struct ImportSubtitlesRequest {
    #[serde(default)]
    pub id: Option<Value>,
}

impl ImportSubtitlesRequest {
    /// Reads a JSON or form-encoded body. An empty or unreadable body has no id.
    pub fn from_body(body: &[u8], form_encoded: bool) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }
        if form_encoded {
            return Self::from_form(body);
        }
        match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => {
                log::warn!("Subtitle import body is not a JSON object: {}", err);
                Self::default()
            }
        }
    }

    fn from_form(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        match web::Query::<HashMap<String, String>>::from_query(&text) {
            Ok(fields) => Self {
                id: fields.into_inner().remove("id").map(Value::String),
            },
            Err(err) => {
                log::warn!("Subtitle import form is unreadable: {}", err);
                Self::default()
            }
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id
            .as_ref()
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_absent_fields_are_skipped() {
        let request: SaveItemRequest =
            serde_json::from_value(json!({"id": "x", "data": null})).unwrap();
        assert!(request.data.is_none());
        assert!(request.children.is_none());
        assert!(request.metadata.is_none());
    }

    #[test]
    fn empty_children_list_is_kept() {
        let request: SaveItemRequest =
            serde_json::from_value(json!({"id": "x", "children": []})).unwrap();
        assert_eq!(request.children, Some(Vec::new()));
    }

    #[test]
    fn delete_flags_default_to_false() {
        let request: DeleteItemRequest = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert!(!request.delete_children);
        assert!(!request.delete_all_versions);
    }

    #[test]
    fn import_id_must_be_non_empty_string() {
        let parse = |v| serde_json::from_value::<ImportSubtitlesRequest>(v).unwrap();
        assert_eq!(parse(json!({})).id(), None);
        assert_eq!(parse(json!({"id": ""})).id(), None);
        assert_eq!(parse(json!({"id": 5})).id(), None);
        assert_eq!(parse(json!({"id": "i4x://a/b/video/c"})).id(), Some("i4x://a/b/video/c"));
    }

    #[test]
    fn import_body_accepts_json_form_and_nothing() {
        let json_body = ImportSubtitlesRequest::from_body(br#"{"id": "i4x://a/b/video/c"}"#, false);
        assert_eq!(json_body.id(), Some("i4x://a/b/video/c"));

        let form = ImportSubtitlesRequest::from_body(b"id=i4x%3A%2F%2Fa%2Fb%2Fvideo%2Fc", true);
        assert_eq!(form.id(), Some("i4x://a/b/video/c"));

        assert_eq!(ImportSubtitlesRequest::from_body(b"", false).id(), None);
        assert_eq!(ImportSubtitlesRequest::from_body(b"", true).id(), None);
        assert_eq!(ImportSubtitlesRequest::from_body(b"not json", false).id(), None);
        assert_eq!(ImportSubtitlesRequest::from_body(b"[1, 2]", false).id(), None);
    }
}
