//! Integration tests for the /users endpoints.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use si_api::app::create_app;

#[actix_web::test]
async fn test_create_and_fetch_user() {
    let app = test::init_service(create_app(common::mock_state())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Alice", "email": "alice@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(created["email"], "alice@example.com");

    let req = test::TestRequest::get()
        .uri(&format!("/users/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn test_duplicate_email_is_a_conflict() {
    let app = test::init_service(create_app(common::mock_state())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Alice", "email": "a@x.com"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Bob", "email": "a@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Conflict");
    assert!(body["message"].as_str().unwrap().contains("a@x.com"));
}

#[actix_web::test]
async fn test_invalid_email_is_rejected() {
    let app = test::init_service(create_app(common::mock_state())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Alice", "email": "not-an-email"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation error");
}

#[actix_web::test]
async fn test_update_keeps_own_email() {
    let app = test::init_service(create_app(common::mock_state())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Alice", "email": "a@x.com"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    // resubmitting the same email for the same user is not a conflict
    let req = test::TestRequest::patch()
        .uri(&format!("/users/{id}"))
        .set_json(json!({"name": "Alice B", "email": "a@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["name"], "Alice B");
}

#[actix_web::test]
async fn test_delete_then_fetch_is_not_found() {
    let app = test::init_service(create_app(common::mock_state())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Alice", "email": "a@x.com"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get()
        .uri(&format!("/users/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Not found");
}

#[actix_web::test]
async fn test_unknown_route_yields_error_body() {
    let app = test::init_service(create_app(common::mock_state())).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Not found");
    assert!(body["message"].is_string());
}
