// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use common::{HTML_URL, PROBLEM_URL, TestHarness, VERTICAL_URL, post_json};

#[actix_web::test]
async fn save_item_updates_only_supplied_fields() {
    let harness = TestHarness::new();
    let app = test::init_service(common::build_test_app(
        harness.app_state(),
        harness.jwt.clone(),
    ))
    .await;
    let session = harness.staff();

    let req = post_json(
        "/save_item",
        json!({"id": HTML_URL, "data": "<p>Updated</p>"}),
        Some(&session),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(test::read_body(resp).await.is_empty());

    let item = harness.item(HTML_URL);
    assert_eq!(item.data, json!("<p>Updated</p>"));
    assert_eq!(item.display_name(), Some("Intro"));
    assert!(item.children.is_empty());
}

#[actix_web::test]
async fn save_item_null_fields_are_skipped() {
    let harness = TestHarness::new();
    let app = test::init_service(common::build_test_app(
        harness.app_state(),
        harness.jwt.clone(),
    ))
    .await;
    let before = harness.item(VERTICAL_URL);

    let req = post_json(
        "/save_item",
        json!({"id": VERTICAL_URL, "data": null, "children": null, "metadata": null}),
        Some(&harness.staff()),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(harness.item(VERTICAL_URL), before);
}

#[actix_web::test]
async fn save_item_empty_children_clears_the_list() {
    let harness = TestHarness::new();
    let app = test::init_service(common::build_test_app(
        harness.app_state(),
        harness.jwt.clone(),
    ))
    .await;

    let req = post_json(
        "/save_item",
        json!({"id": VERTICAL_URL, "children": []}),
        Some(&harness.staff()),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(harness.children(VERTICAL_URL).is_empty());
}

#[actix_web::test]
async fn save_item_reorders_children() {
    let harness = TestHarness::new();
    let app = test::init_service(common::build_test_app(
        harness.app_state(),
        harness.jwt.clone(),
    ))
    .await;

    let req = post_json(
        "/save_item",
        json!({"id": VERTICAL_URL, "children": [PROBLEM_URL, HTML_URL]}),
        Some(&harness.staff()),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(harness.children(VERTICAL_URL), vec![PROBLEM_URL, HTML_URL]);
}

#[actix_web::test]
async fn save_item_merges_metadata() {
    let harness = TestHarness::new();
    let app = test::init_service(common::build_test_app(
        harness.app_state(),
        harness.jwt.clone(),
    ))
    .await;

    let req = post_json(
        "/save_item",
        json!({"id": HTML_URL, "metadata": {"display_name": "Welcome", "weight": null, "due": "2026-01-01"}}),
        Some(&harness.staff()),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let metadata = harness.item(HTML_URL).metadata;
    assert_eq!(metadata.get("display_name"), Some(&json!("Welcome")));
    assert_eq!(metadata.get("due"), Some(&json!("2026-01-01")));
    assert!(!metadata.contains_key("weight"));
}

#[actix_web::test]
async fn save_item_null_for_absent_metadata_key_is_noop() {
    let harness = TestHarness::new();
    let app = test::init_service(common::build_test_app(
        harness.app_state(),
        harness.jwt.clone(),
    ))
    .await;
    let before = harness.item(HTML_URL).metadata;

    let req = post_json(
        "/save_item",
        json!({"id": HTML_URL, "metadata": {"graded": null}}),
        Some(&harness.staff()),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(harness.item(HTML_URL).metadata, before);
}

#[actix_web::test]
async fn save_item_requires_login() {
    let harness = TestHarness::new();
    let app = test::init_service(common::build_test_app(
        harness.app_state(),
        harness.jwt.clone(),
    ))
    .await;

    let req = post_json("/save_item", json!({"id": HTML_URL, "data": "x"}), None).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(harness.item(HTML_URL).data, json!("<p>Welcome</p>"));
}

#[actix_web::test]
async fn save_item_rejects_users_without_course_access() {
    let harness = TestHarness::new();
    let app = test::init_service(common::build_test_app(
        harness.app_state(),
        harness.jwt.clone(),
    ))
    .await;

    let req = post_json(
        "/save_item",
        json!({"id": HTML_URL, "data": "x"}),
        Some(&harness.outsider()),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "permission_denied");
    assert_eq!(harness.item(HTML_URL).data, json!("<p>Welcome</p>"));
}

#[actix_web::test]
async fn save_item_reports_bad_and_unknown_locations() {
    let harness = TestHarness::new();
    let app = test::init_service(common::build_test_app(
        harness.app_state(),
        harness.jwt.clone(),
    ))
    .await;
    let session = harness.staff();

    let req = post_json("/save_item", json!({"id": "BAD_LOCATION"}), Some(&session)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_location");

    let req = post_json(
        "/save_item",
        json!({"id": "i4x://MITx/999/html/Missing", "data": "x"}),
        Some(&session),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_json_is_rejected() {
    let harness = TestHarness::new();
    let app = test::init_service(common::build_test_app(
        harness.app_state(),
        harness.jwt.clone(),
    ))
    .await;
    let session = harness.staff();

    let req = test::TestRequest::post()
        .uri("/save_item")
        .insert_header(("content-type", "application/json"))
        .insert_header((
            actix_web::http::header::AUTHORIZATION,
            format!("Bearer {}", session.token),
        ))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}
