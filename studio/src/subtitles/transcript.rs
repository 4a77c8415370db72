// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    Xml(String),
    BadTiming(String),
    NoCaptions,
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::Xml(msg) => write!(f, "Transcript XML error: {}", msg),
            TranscriptError::BadTiming(msg) => write!(f, "Transcript timing error: {}", msg),
            TranscriptError::NoCaptions => write!(f, "Transcript has no captions"),
        }
    }
}

impl std::error::Error for TranscriptError {}

/// Caption track in the editor's SJSON layout: parallel arrays, times in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sjson {
    pub start: Vec<u64>,
    pub end: Vec<u64>,
    pub text: Vec<String>,
}

impl Sjson {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Converts a YouTube timed-text document
/// (`<transcript><text start=".." dur="..">..</text></transcript>`) to SJSON.
/// Entries without text are dropped.
pub fn transcript_to_sjson(xml: &str) -> Result<Sjson, TranscriptError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|e| TranscriptError::Xml(e.to_string()))?;

    let mut subs = Sjson::default();
    for node in document
        .root_element()
        .children()
        .filter(|node| node.has_tag_name("text"))
    {
        let start = timing_attribute(&node, "start")?;
        let duration = timing_attribute(&node, "dur")?;
        let text = caption_text(&node);
        if text.trim().is_empty() {
            continue;
        }
        let end = start + duration;
        subs.start.push((start * 1000.0) as u64);
        subs.end.push(((end + 0.0001) * 1000.0) as u64);
        subs.text.push(text);
    }

    if subs.is_empty() {
        return Err(TranscriptError::NoCaptions);
    }
    Ok(subs)
}

/// Text of every descendant, so inline markup such as `<font>` keeps its words.
fn caption_text(node: &roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect::<String>()
        .replace('\n', " ")
}

fn timing_attribute(node: &roxmltree::Node<'_, '_>, name: &str) -> Result<f64, TranscriptError> {
    let raw = node
        .attribute(name)
        .ok_or_else(|| TranscriptError::BadTiming(format!("missing '{}'", name)))?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TranscriptError::BadTiming(format!("'{}' is not a number", raw)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(TranscriptError::BadTiming(format!(
            "'{}' is out of range",
            raw
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_entries_to_milliseconds() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0.5" dur="1.25">Hello
world</text><text start="2" dur="3">Bye &amp; thanks</text></transcript>"#;
        let subs = transcript_to_sjson(xml).unwrap();
        assert_eq!(subs.start, vec![500, 2000]);
        assert_eq!(subs.end, vec![1750, 5000]);
        assert_eq!(subs.text, vec!["Hello world", "Bye & thanks"]);
    }

    #[test]
    fn keeps_text_inside_inline_markup() {
        let xml = r#"<transcript><text start="0" dur="1">a <font color="red">b</font> c</text></transcript>"#;
        let subs = transcript_to_sjson(xml).unwrap();
        assert_eq!(subs.text, vec!["a b c"]);
    }

    #[test]
    fn skips_blank_entries() {
        let xml = r#"<transcript><text start="0" dur="1"></text><text start="1" dur="1">x</text></transcript>"#;
        let subs = transcript_to_sjson(xml).unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs.start, vec![1000]);
    }

    #[test]
    fn rejects_empty_or_broken_documents() {
        assert_eq!(
            transcript_to_sjson("<transcript/>"),
            Err(TranscriptError::NoCaptions)
        );
        assert!(matches!(
            transcript_to_sjson("<<<transcript"),
            Err(TranscriptError::Xml(_))
        ));
        assert!(matches!(
            transcript_to_sjson(r#"<transcript><text start="a" dur="1">x</text></transcript>"#),
            Err(TranscriptError::BadTiming(_))
        ));
        assert!(matches!(
            transcript_to_sjson(r#"<transcript><text start="1">x</text></transcript>"#),
            Err(TranscriptError::BadTiming(_))
        ));
    }

    #[test]
    fn sjson_serializes_parallel_arrays() {
        let subs = Sjson {
            start: vec![0],
            end: vec![100],
            text: vec!["a".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&subs).unwrap(),
            r#"{"start":[0],"end":[100],"text":["a"]}"#
        );
    }
}
