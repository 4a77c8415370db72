// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Item type, the third segment of a location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Course,
    Chapter,
    Sequential,
    Vertical,
    Video,
    VideoAlpha,
    Html,
    Problem,
    About,
    StaticTab,
    CourseInfo,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Course => "course",
            Category::Chapter => "chapter",
            Category::Sequential => "sequential",
            Category::Vertical => "vertical",
            Category::Video => "video",
            Category::VideoAlpha => "videoalpha",
            Category::Html => "html",
            Category::Problem => "problem",
            Category::About => "about",
            Category::StaticTab => "static_tab",
            Category::CourseInfo => "course_info",
            Category::Other(name) => name.as_str(),
        }
    }

    /// Detached items exist in a course but are never linked into the children tree.
    pub fn is_detached(&self) -> bool {
        matches!(
            self,
            Category::About | Category::StaticTab | Category::CourseInfo
        )
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value {
            "course" => Category::Course,
            "chapter" => Category::Chapter,
            "sequential" => Category::Sequential,
            "vertical" => Category::Vertical,
            "video" => Category::Video,
            "videoalpha" => Category::VideoAlpha,
            "html" => Category::Html,
            "problem" => Category::Problem,
            "about" => Category::About,
            "static_tab" => Category::StaticTab,
            "course_info" => Category::CourseInfo,
            other => Category::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::from(raw.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_categories_are_fixed() {
        assert!(Category::About.is_detached());
        assert!(Category::StaticTab.is_detached());
        assert!(Category::CourseInfo.is_detached());
        assert!(!Category::Video.is_detached());
        assert!(!Category::Html.is_detached());
        assert!(!Category::Other("discussion".to_string()).is_detached());
    }

    #[test]
    fn unknown_names_round_trip_through_other() {
        let category = Category::from("discussion");
        assert_eq!(category, Category::Other("discussion".to_string()));
        assert_eq!(category.as_str(), "discussion");
        assert_eq!(Category::from("static_tab"), Category::StaticTab);
    }
}
