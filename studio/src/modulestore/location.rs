// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::category::Category;

pub const LOCATION_TAG: &str = "i4x";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLocation {
    input: String,
    reason: &'static str,
}

impl InvalidLocation {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

impl fmt::Display for InvalidLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid location '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for InvalidLocation {}

/// Address of a course item: `i4x://{org}/{course}/{category}/{name}[@{revision}]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub org: String,
    pub course: String,
    pub category: Category,
    pub name: String,
    pub revision: Option<String>,
}

impl Location {
    pub fn new(
        org: impl Into<String>,
        course: impl Into<String>,
        category: Category,
        name: impl Into<String>,
    ) -> Self {
        Self {
            org: org.into(),
            course: course.into(),
            category,
            name: name.into(),
            revision: None,
        }
    }

    pub fn parse(input: &str) -> Result<Self, InvalidLocation> {
        let rest = input
            .strip_prefix(LOCATION_TAG)
            .and_then(|rest| rest.strip_prefix("://"))
            .ok_or_else(|| InvalidLocation::new(input, "missing i4x:// prefix"))?;

        let (path, revision) = match rest.split_once('@') {
            Some((path, revision)) => {
                if revision.is_empty() || !revision.chars().all(is_plain_char) {
                    return Err(InvalidLocation::new(input, "malformed revision"));
                }
                (path, Some(revision.to_string()))
            }
            None => (rest, None),
        };

        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != 4 {
            return Err(InvalidLocation::new(
                input,
                "expected org/course/category/name",
            ));
        }

        for part in &parts[..3] {
            if part.is_empty() || !part.chars().all(is_plain_char) {
                return Err(InvalidLocation::new(input, "invalid characters"));
            }
        }
        let name = parts[3];
        if name.is_empty() || !name.chars().all(|c| is_plain_char(c) || c == ':') {
            return Err(InvalidLocation::new(input, "invalid name"));
        }

        Ok(Self {
            org: parts[0].to_string(),
            course: parts[1].to_string(),
            category: Category::from(parts[2]),
            name: name.to_string(),
            revision,
        })
    }

    /// Canonical URL without the revision; this is the form stored in children lists.
    pub fn url(&self) -> String {
        format!(
            "{}://{}/{}/{}/{}",
            LOCATION_TAG,
            self.org,
            self.course,
            self.category.as_str(),
            self.name
        )
    }

    /// A sibling location in the same course with a different category and name.
    pub fn with_category_and_name(&self, category: Category, name: impl Into<String>) -> Self {
        Self {
            org: self.org.clone(),
            course: self.course.clone(),
            category,
            name: name.into(),
            revision: None,
        }
    }

    /// `{org}.{course}`, the identifier used for course-scoped roles.
    pub fn course_id(&self) -> String {
        format!("{}.{}", self.org, self.course)
    }
}

fn is_plain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())?;
        if let Some(revision) = &self.revision {
            write!(f, "@{}", revision)?;
        }
        Ok(())
    }
}

impl FromStr for Location {
    type Err = InvalidLocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Location::parse(&raw).map_err(de::Error::custom)
    }
}
