//! Authentication and group/permission gating on mutating routes.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, delete, get, patch_json, post_json, token_with};
use serde_json::json;
use vuement_core::permissions::{GROUP_ADMIN, PERMISSION_CREATE, PERMISSION_DELETE};

const BASE: &str = "/vuement/component";

fn footer_component() -> serde_json::Value {
    json!({"name": "Footer", "children": [], "props": []})
}

#[tokio::test]
async fn create_without_token_returns_401() {
    let (app, store) = common::build_test_app_with_store();

    let response = post_json(&app, BASE, None, footer_component()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_with_garbage_token_returns_401() {
    let app = common::build_test_app();

    let response = post_json(&app, BASE, Some("not-a-jwt"), footer_component()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_without_admin_group_returns_403() {
    let (app, store) = common::build_test_app_with_store();
    let token = token_with(&["editor"], &[PERMISSION_CREATE]);

    let response = post_json(&app, BASE, Some(&token), footer_component()).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_without_permission_returns_403() {
    let (app, store) = common::build_test_app_with_store();
    let token = token_with(&[GROUP_ADMIN], &[PERMISSION_DELETE]);

    let response = post_json(&app, BASE, Some(&token), footer_component()).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn update_requires_update_permission() {
    let app = common::build_test_app();
    let created = body_json(post_json(&app, BASE, Some(&admin_token()), footer_component()).await).await;
    let id = created["id"].as_str().unwrap();

    let token = token_with(&[GROUP_ADMIN], &[PERMISSION_CREATE]);
    let response = patch_json(
        &app,
        &format!("{BASE}/{id}"),
        Some(&token),
        json!({"name": "Sidebar"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get(&app, &format!("{BASE}/{id}")).await).await;
    assert_eq!(json["name"], "Footer");
}

#[tokio::test]
async fn delete_requires_delete_permission() {
    let (app, store) = common::build_test_app_with_store();
    let created = body_json(post_json(&app, BASE, Some(&admin_token()), footer_component()).await).await;
    let id = created["id"].as_str().unwrap();

    let response = delete(&app, &format!("{BASE}/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = token_with(&[GROUP_ADMIN], &[PERMISSION_CREATE]);
    let response = delete(&app, &format!("{BASE}/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn reads_are_public() {
    let app = common::build_test_app();

    let response = get(&app, BASE).await;

    assert_eq!(response.status(), StatusCode::OK);
}
