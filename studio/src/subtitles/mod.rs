// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;

mod timing;
mod transcript;
mod youtube;

pub use timing::{TimingMap, TimingMapError};
pub use transcript::{Sjson, TranscriptError, transcript_to_sjson};
pub use youtube::YoutubeSubtitleFetcher;

pub const SJSON_CONTENT_TYPE: &str = "application/json";

/// Asset name under which captions for one YouTube id are stored.
pub fn subs_filename(youtube_id: &str) -> String {
    format!("subs_{}.srt.sjson", youtube_id)
}

/// Obtains caption tracks for every id in a timing map and stores them as
/// course assets. Returns true only when all of them were obtained and stored.
#[async_trait(?Send)]
pub trait SubtitleFetcher: Send + Sync {
    async fn fetch(&self, timing: &TimingMap, org: &str, course: &str) -> bool;
}
