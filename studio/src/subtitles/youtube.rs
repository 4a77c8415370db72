// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;
use awc::http::StatusCode;
use std::sync::Arc;
use std::time::Duration;

use super::transcript::{Sjson, transcript_to_sjson};
use super::{SJSON_CONTENT_TYPE, SubtitleFetcher, TimingMap, subs_filename};
use crate::config::SubtitlesConfig;
use crate::contentstore::{ContentLocation, ContentStore, StaticContent};

const MAX_TRANSCRIPT_BYTES: usize = 4 * 1024 * 1024;

/// Fetches caption tracks from YouTube's timed-text endpoint, one request per
/// id, and stores each as an SJSON asset of the course.
pub struct YoutubeSubtitleFetcher {
    base_url: String,
    language: String,
    timeout: Duration,
    content: Arc<dyn ContentStore>,
}

impl YoutubeSubtitleFetcher {
    pub fn new(
        base_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
        content: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            language: language.into(),
            timeout,
            content,
        }
    }

    pub fn from_config(config: &SubtitlesConfig, content: Arc<dyn ContentStore>) -> Self {
        Self::new(
            config.youtube_url.clone(),
            config.language.clone(),
            Duration::from_secs(config.timeout_seconds),
            content,
        )
    }

    async fn download(&self, youtube_id: &str) -> Result<Sjson, String> {
        if !is_valid_youtube_id(youtube_id) {
            return Err(format!("invalid YouTube id '{}'", youtube_id));
        }

        let client = awc::Client::builder().timeout(self.timeout).finish();
        let request = client
            .get(self.base_url.as_str())
            .query(&[("lang", self.language.as_str()), ("v", youtube_id)])
            .map_err(|e| format!("failed to build request: {}", e))?;
        let mut response = request
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if response.status() != StatusCode::OK {
            return Err(format!("upstream answered {}", response.status()));
        }

        let body = response
            .body()
            .limit(MAX_TRANSCRIPT_BYTES)
            .await
            .map_err(|e| format!("failed to read body: {}", e))?;
        if body.is_empty() {
            return Err("upstream returned no transcript".to_string());
        }
        let text = std::str::from_utf8(&body)
            .map_err(|e| format!("transcript is not UTF-8: {}", e))?;

        transcript_to_sjson(text).map_err(|e| e.to_string())
    }

    fn store(&self, subs: &Sjson, youtube_id: &str, org: &str, course: &str) -> Result<(), String> {
        let location = ContentLocation::compute(org, course, &subs_filename(youtube_id))
            .map_err(|e| e.to_string())?;
        let data = serde_json::to_vec(subs).map_err(|e| e.to_string())?;
        self.content
            .save(StaticContent {
                location,
                content_type: SJSON_CONTENT_TYPE.to_string(),
                data,
            })
            .map_err(|e| e.to_string())
    }
}

fn is_valid_youtube_id(youtube_id: &str) -> bool {
    !youtube_id.is_empty()
        && youtube_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[async_trait(?Send)]
impl SubtitleFetcher for YoutubeSubtitleFetcher {
    async fn fetch(&self, timing: &TimingMap, org: &str, course: &str) -> bool {
        let mut all_stored = true;
        for (speed, youtube_id) in timing.iter() {
            let outcome = match self.download(youtube_id).await {
                Ok(subs) => self
                    .store(&subs, youtube_id, org, course)
                    .map(|_| subs.len()),
                Err(err) => Err(err),
            };
            match outcome {
                Ok(count) => log::info!(
                    "Stored {} caption(s) for {} (speed {}) in {}/{}",
                    count,
                    youtube_id,
                    speed,
                    org,
                    course
                ),
                Err(err) => {
                    log::warn!(
                        "Captions for {} (speed {}) unavailable: {}",
                        youtube_id,
                        speed,
                        err
                    );
                    all_stored = false;
                }
            }
        }
        all_stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contentstore::MemoryContentStore;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use std::collections::HashMap;

    const TRANSCRIPT: &str =
        r#"<transcript><text start="0" dur="1.5">Hi</text><text start="2" dur="1">There</text></transcript>"#;

    async fn timedtext(query: web::Query<HashMap<String, String>>) -> HttpResponse {
        if query.get("lang").map(String::as_str) != Some("en") {
            return HttpResponse::BadRequest().finish();
        }
        match query.get("v").map(String::as_str) {
            Some("good1") | Some("good2") => HttpResponse::Ok()
                .content_type("text/xml")
                .body(TRANSCRIPT),
            Some("empty") => HttpResponse::Ok().finish(),
            _ => HttpResponse::NotFound().finish(),
        }
    }

    async fn with_upstream<F, Fut>(test: F)
    where
        F: FnOnce(String) -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        let server = HttpServer::new(|| App::new().route("/timedtext", web::get().to(timedtext)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind upstream");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        test(format!("http://{}/timedtext", addr)).await;

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn fetch_stores_every_track() {
        with_upstream(|url| async move {
            let content = Arc::new(MemoryContentStore::new());
            let fetcher =
                YoutubeSubtitleFetcher::new(url, "en", Duration::from_secs(5), content.clone());
            let timing = TimingMap::parse("1.0:good1,1.5:good2").unwrap();

            assert!(fetcher.fetch(&timing, "MITx", "999").await);
            assert_eq!(content.len(), 2);

            let location =
                ContentLocation::compute("MITx", "999", "subs_good1.srt.sjson").unwrap();
            let stored = content.find(&location).expect("stored subs");
            let subs: Sjson = serde_json::from_slice(&stored.data).unwrap();
            assert_eq!(subs.start, vec![0, 2000]);
            assert_eq!(subs.end, vec![1500, 3000]);
            assert_eq!(subs.text, vec!["Hi", "There"]);
        })
        .await;
    }

    #[actix_web::test]
    async fn fetch_reports_failure_when_any_track_is_missing() {
        with_upstream(|url| async move {
            let content = Arc::new(MemoryContentStore::new());
            let fetcher =
                YoutubeSubtitleFetcher::new(url, "en", Duration::from_secs(5), content.clone());
            let timing = TimingMap::parse("0.75:missing,1.0:good1,1.25:empty").unwrap();

            assert!(!fetcher.fetch(&timing, "MITx", "999").await);
            assert_eq!(content.len(), 1);
        })
        .await;
    }

    #[actix_web::test]
    async fn fetch_rejects_ids_outside_charset() {
        let content = Arc::new(MemoryContentStore::new());
        let fetcher = YoutubeSubtitleFetcher::new(
            "http://127.0.0.1:9/timedtext",
            "en",
            Duration::from_secs(1),
            content.clone(),
        );
        let timing = TimingMap::parse("1.0:../../etc").unwrap();

        assert!(!fetcher.fetch(&timing, "MITx", "999").await);
        assert!(content.is_empty());
    }
}
