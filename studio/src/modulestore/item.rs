// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::location::Location;

pub type Metadata = serde_json::Map<String, Value>;

pub const DISPLAY_NAME_KEY: &str = "display_name";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub location: Location,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub children: Vec<String>,
}

impl Item {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            data: Value::String(String::new()),
            metadata: Metadata::new(),
            children: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<String>) -> Self {
        self.children = children;
        self
    }

    pub fn display_name(&self) -> Option<&str> {
        self.metadata.get(DISPLAY_NAME_KEY).and_then(Value::as_str)
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.metadata
            .insert(DISPLAY_NAME_KEY.to_string(), Value::String(name.into()));
    }

    /// The payload as text, when it is one.
    pub fn data_text(&self) -> Option<&str> {
        self.data.as_str()
    }
}

/// Applies a partial metadata update: `null` removes a key, anything else sets it.
pub fn merge_metadata(existing: &mut Metadata, posted: &Metadata) {
    for (key, value) in posted {
        if value.is_null() {
            existing.remove(key);
        } else {
            existing.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Metadata {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn merge_sets_removes_and_keeps() {
        let mut existing = metadata(json!({"display_name": "Old", "graded": true, "xqa_key": "k"}));
        let posted = metadata(json!({"display_name": "New", "graded": null, "due": "2013-01-01"}));

        merge_metadata(&mut existing, &posted);

        assert_eq!(
            Value::Object(existing),
            json!({"display_name": "New", "xqa_key": "k", "due": "2013-01-01"})
        );
    }

    #[test]
    fn merge_null_for_absent_key_is_noop() {
        let mut existing = metadata(json!({"display_name": "Keep"}));
        merge_metadata(&mut existing, &metadata(json!({"missing": null})));
        assert_eq!(Value::Object(existing), json!({"display_name": "Keep"}));
    }
}
