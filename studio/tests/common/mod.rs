// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use studio::app_state::AppState;
use studio::bootstrap::templates::default_templates;
use studio::config::ValidatedConfig;
use studio::iam::{JwtAuthMiddlewareFactory, JwtService, RoleAccess, User};
use studio::items;
use studio::modulestore::{Item, Location, MemoryModuleStore, ModuleStore};
use studio::subtitles::{SubtitleFetcher, TimingMap};
use studio::util::test_config;

pub const COURSE_URL: &str = "i4x://MITx/999/course/Robot_Super_Course";
pub const CHAPTER_URL: &str = "i4x://MITx/999/chapter/Week_1";
pub const SEQUENTIAL_URL: &str = "i4x://MITx/999/sequential/Lesson_1";
pub const VERTICAL_URL: &str = "i4x://MITx/999/vertical/Unit_1";
pub const HTML_URL: &str = "i4x://MITx/999/html/Intro";
pub const PROBLEM_URL: &str = "i4x://MITx/999/problem/Quiz";

pub const VIDEO_TEMPLATE: &str = "i4x://edx/templates/video/default";
pub const HTML_TEMPLATE: &str = "i4x://edx/templates/html/Announcement";
pub const STATIC_TAB_TEMPLATE: &str = "i4x://edx/templates/static_tab/Empty";

#[derive(Debug, Clone, PartialEq)]
pub struct FetchCall {
    pub timing: Vec<(f64, String)>,
    pub org: String,
    pub course: String,
}

/// Records every fetch and answers with a fixed outcome.
pub struct RecordingFetcher {
    result: bool,
    calls: Mutex<Vec<FetchCall>>,
}

impl RecordingFetcher {
    pub fn new(result: bool) -> Self {
        Self {
            result,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().expect("fetch calls").clone()
    }
}

#[async_trait(?Send)]
impl SubtitleFetcher for RecordingFetcher {
    async fn fetch(&self, timing: &TimingMap, org: &str, course: &str) -> bool {
        self.calls.lock().expect("fetch calls").push(FetchCall {
            timing: timing
                .iter()
                .map(|(speed, id)| (speed, id.to_string()))
                .collect(),
            org: org.to_string(),
            course: course.to_string(),
        });
        self.result
    }
}

pub struct AuthSession {
    pub user: User,
    pub token: String,
}

pub struct TestHarness {
    pub config: Arc<ValidatedConfig>,
    pub store: Arc<MemoryModuleStore>,
    pub fetcher: Arc<RecordingFetcher>,
    pub jwt: Arc<JwtService>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_fetch_result(true)
    }

    pub fn with_fetch_result(result: bool) -> Self {
        let config = Arc::new(test_config());
        let jwt = Arc::new(JwtService::new(&config.auth).expect("jwt service"));
        let mut items = default_templates();
        items.extend(course_items());

        Self {
            config,
            store: Arc::new(MemoryModuleStore::from_items(items)),
            fetcher: Arc::new(RecordingFetcher::new(result)),
            jwt,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.store.clone(),
            self.fetcher.clone(),
            Arc::new(RoleAccess),
            self.config.subtitles.video_categories.clone(),
        )
    }

    pub fn session(&self, username: &str, roles: &[&str]) -> AuthSession {
        let user = User::new(
            username,
            roles.iter().map(|role| role.to_string()).collect(),
        );
        let token = self.jwt.create_token(&user).expect("token");
        AuthSession { user, token }
    }

    /// Course staff of MITx/999.
    pub fn staff(&self) -> AuthSession {
        self.session("staff", &["staff_MITx.999"])
    }

    /// Logged in, but staff of a different course.
    pub fn outsider(&self) -> AuthSession {
        self.session("outsider", &["staff_edX.101"])
    }

    pub fn item(&self, url: &str) -> Item {
        self.store
            .get_item(&Location::parse(url).expect("location"))
            .expect("item")
    }

    pub fn children(&self, url: &str) -> Vec<String> {
        self.item(url).children
    }

    pub fn contains(&self, url: &str) -> bool {
        self.store
            .get_item(&Location::parse(url).expect("location"))
            .is_ok()
    }

    pub fn set_data(&self, url: &str, data: &str) {
        self.store
            .update_item(
                &Location::parse(url).expect("location"),
                Value::String(data.to_string()),
            )
            .expect("update data");
    }
}

fn course_items() -> Vec<Item> {
    vec![
        Item::new(Location::parse(COURSE_URL).expect("course"))
            .with_metadata("display_name", "Robot Super Course")
            .with_children(vec![CHAPTER_URL.to_string()]),
        Item::new(Location::parse(CHAPTER_URL).expect("chapter"))
            .with_children(vec![SEQUENTIAL_URL.to_string()]),
        Item::new(Location::parse(SEQUENTIAL_URL).expect("sequential"))
            .with_children(vec![VERTICAL_URL.to_string()]),
        Item::new(Location::parse(VERTICAL_URL).expect("vertical"))
            .with_children(vec![HTML_URL.to_string(), PROBLEM_URL.to_string()]),
        Item::new(Location::parse(HTML_URL).expect("html"))
            .with_data("<p>Welcome</p>")
            .with_metadata("display_name", "Intro")
            .with_metadata("weight", 1),
        Item::new(Location::parse(PROBLEM_URL).expect("problem"))
            .with_data("<problem/>"),
    ]
}

pub fn build_test_app(
    app_state: AppState,
    jwt: Arc<JwtService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(app_state))
        .app_data(web::Data::from(jwt))
        .wrap(JwtAuthMiddlewareFactory)
        .configure(items::configure)
}

pub fn post_json(uri: &str, body: Value, session: Option<&AuthSession>) -> test::TestRequest {
    let req = test::TestRequest::post().uri(uri).set_json(body);
    match session {
        Some(session) => req.insert_header((AUTHORIZATION, format!("Bearer {}", session.token))),
        None => req,
    }
}
