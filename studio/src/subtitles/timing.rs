// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimingMapError {
    Empty,
    MissingSeparator(String),
    BadSpeed(String),
}

impl fmt::Display for TimingMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingMapError::Empty => write!(f, "Timing map is empty"),
            TimingMapError::MissingSeparator(segment) => {
                write!(f, "Segment '{}' has no ':' separator", segment)
            }
            TimingMapError::BadSpeed(segment) => {
                write!(f, "Segment '{}' has a non-numeric speed", segment)
            }
        }
    }
}

impl std::error::Error for TimingMapError {}

/// Playback speed to YouTube id, in attribute order. A repeated speed keeps the
/// last id given for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingMap {
    entries: Vec<(f64, String)>,
}

impl TimingMap {
    /// Parses a `youtube` attribute such as `0.75:JMD_ifUUfsU,1.0:hI10vDNYz4M`.
    /// Any bad segment rejects the whole attribute.
    pub fn parse(attribute: &str) -> Result<Self, TimingMapError> {
        let mut map = TimingMap::default();
        for segment in attribute.split(',') {
            let (speed, youtube_id) = segment
                .split_once(':')
                .ok_or_else(|| TimingMapError::MissingSeparator(segment.to_string()))?;
            let speed: f64 = speed
                .trim()
                .parse()
                .map_err(|_| TimingMapError::BadSpeed(segment.to_string()))?;
            if !speed.is_finite() {
                return Err(TimingMapError::BadSpeed(segment.to_string()));
            }
            map.insert(speed, youtube_id.to_string());
        }
        if map.is_empty() {
            return Err(TimingMapError::Empty);
        }
        Ok(map)
    }

    pub fn insert(&mut self, speed: f64, youtube_id: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == speed) {
            Some(entry) => entry.1 = youtube_id,
            None => self.entries.push((speed, youtube_id)),
        }
    }

    pub fn get(&self, speed: f64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == speed)
            .map(|(_, id)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &str)> {
        self.entries.iter().map(|(speed, id)| (*speed, id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
