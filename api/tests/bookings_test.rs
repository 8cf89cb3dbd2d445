//! Integration tests for the /bookings endpoints: the full lifecycle from
//! creation through the owner's decision, plus the state-filtered listings.

mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use si_api::app::create_app;
use si_api::identity::SHARER_USER_ID;

async fn create_user<S, B>(app: &S, name: &str, email: &str) -> i64
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": name, "email": email}))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["id"].as_i64().unwrap()
}

async fn create_item<S, B>(app: &S, owner_id: i64) -> i64
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/items")
        .insert_header((SHARER_USER_ID, owner_id.to_string()))
        .set_json(json!({"name": "Drill", "description": "Cordless", "available": true}))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["id"].as_i64().unwrap()
}

fn window(days_from_now: i64, length_days: i64) -> (String, String) {
    let start = Utc::now() + Duration::days(days_from_now);
    let end = start + Duration::days(length_days);
    (start.to_rfc3339(), end.to_rfc3339())
}

async fn book<S, B>(app: &S, booker_id: i64, item_id: i64, start: &str, end: &str) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header((SHARER_USER_ID, booker_id.to_string()))
        .set_json(json!({"item_id": item_id, "start": start, "end": end}))
        .to_request();
    test::call_and_read_body_json(app, req).await
}

#[actix_web::test]
async fn test_booking_lifecycle_create_approve_list() {
    let app = test::init_service(create_app(common::mock_state())).await;
    let owner = create_user(&app, "Alice", "a@x.com").await;
    let booker = create_user(&app, "Bob", "b@x.com").await;
    let item = create_item(&app, owner).await;

    let (start, end) = window(1, 2);
    let booking = book(&app, booker, item, &start, &end).await;
    assert_eq!(booking["status"], "WAITING");
    let booking_id = booking["id"].as_i64().unwrap();

    // the owner approves
    let req = test::TestRequest::patch()
        .uri(&format!("/bookings/{booking_id}?approved=true"))
        .insert_header((SHARER_USER_ID, owner.to_string()))
        .to_request();
    let decided: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(decided["status"], "APPROVED");

    // approval bumps the item's rental counter
    let req = test::TestRequest::get()
        .uri(&format!("/items/{item}"))
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["rental_count"], json!(1));

    // booker sees it under FUTURE, no longer under WAITING
    let req = test::TestRequest::get()
        .uri("/bookings?state=FUTURE")
        .insert_header((SHARER_USER_ID, booker.to_string()))
        .to_request();
    let future: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(future.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/bookings?state=WAITING")
        .insert_header((SHARER_USER_ID, booker.to_string()))
        .to_request();
    let waiting: Value = test::call_and_read_body_json(&app, req).await;
    assert!(waiting.as_array().unwrap().is_empty());

    // the owner axis sees the same booking
    let req = test::TestRequest::get()
        .uri("/bookings/owner?state=ALL")
        .insert_header((SHARER_USER_ID, owner.to_string()))
        .to_request();
    let owned: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(owned.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_overlap_with_approved_booking_is_rejected() {
    let app = test::init_service(create_app(common::mock_state())).await;
    let owner = create_user(&app, "Alice", "a@x.com").await;
    let bob = create_user(&app, "Bob", "b@x.com").await;
    let carol = create_user(&app, "Carol", "c@x.com").await;
    let item = create_item(&app, owner).await;

    let (start, end) = window(1, 3);
    let booking = book(&app, bob, item, &start, &end).await;
    let booking_id = booking["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/bookings/{booking_id}?approved=true"))
        .insert_header((SHARER_USER_ID, owner.to_string()))
        .to_request();
    test::call_service(&app, req).await;

    // an overlapping window can no longer be booked
    let (start, end) = window(2, 3);
    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header((SHARER_USER_ID, carol.to_string()))
        .set_json(json!({"item_id": item, "start": start, "end": end}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // a disjoint window is fine
    let (start, end) = window(10, 1);
    let booking = book(&app, carol, item, &start, &end).await;
    assert_eq!(booking["status"], "WAITING");
}

#[actix_web::test]
async fn test_owners_cannot_book_their_own_items() {
    let app = test::init_service(create_app(common::mock_state())).await;
    let owner = create_user(&app, "Alice", "a@x.com").await;
    let item = create_item(&app, owner).await;

    let (start, end) = window(1, 1);
    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header((SHARER_USER_ID, owner.to_string()))
        .set_json(json!({"item_id": item, "start": start, "end": end}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_past_window_is_rejected_at_the_boundary() {
    let app = test::init_service(create_app(common::mock_state())).await;
    let owner = create_user(&app, "Alice", "a@x.com").await;
    let booker = create_user(&app, "Bob", "b@x.com").await;
    let item = create_item(&app, owner).await;

    let (start, end) = window(-2, 1);
    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header((SHARER_USER_ID, booker.to_string()))
        .set_json(json!({"item_id": item, "start": start, "end": end}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_only_parties_may_view_a_booking() {
    let app = test::init_service(create_app(common::mock_state())).await;
    let owner = create_user(&app, "Alice", "a@x.com").await;
    let booker = create_user(&app, "Bob", "b@x.com").await;
    let outsider = create_user(&app, "Carol", "c@x.com").await;
    let item = create_item(&app, owner).await;

    let (start, end) = window(1, 1);
    let booking = book(&app, booker, item, &start, &end).await;
    let booking_id = booking["id"].as_i64().unwrap();

    for caller in [owner, booker] {
        let req = test::TestRequest::get()
            .uri(&format!("/bookings/{booking_id}"))
            .insert_header((SHARER_USER_ID, caller.to_string()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/bookings/{booking_id}"))
        .insert_header((SHARER_USER_ID, outsider.to_string()))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_decision_is_final() {
    let app = test::init_service(create_app(common::mock_state())).await;
    let owner = create_user(&app, "Alice", "a@x.com").await;
    let booker = create_user(&app, "Bob", "b@x.com").await;
    let item = create_item(&app, owner).await;

    let (start, end) = window(1, 1);
    let booking = book(&app, booker, item, &start, &end).await;
    let booking_id = booking["id"].as_i64().unwrap();

    // only the owner may decide
    let req = test::TestRequest::patch()
        .uri(&format!("/bookings/{booking_id}?approved=false"))
        .insert_header((SHARER_USER_ID, booker.to_string()))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::patch()
        .uri(&format!("/bookings/{booking_id}?approved=false"))
        .insert_header((SHARER_USER_ID, owner.to_string()))
        .to_request();
    let decided: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(decided["status"], "REJECTED");

    // a second decision is rejected
    let req = test::TestRequest::patch()
        .uri(&format!("/bookings/{booking_id}?approved=true"))
        .insert_header((SHARER_USER_ID, owner.to_string()))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_booker_cancels_a_waiting_booking() {
    let app = test::init_service(create_app(common::mock_state())).await;
    let owner = create_user(&app, "Alice", "a@x.com").await;
    let booker = create_user(&app, "Bob", "b@x.com").await;
    let item = create_item(&app, owner).await;

    let (start, end) = window(1, 1);
    let booking = book(&app, booker, item, &start, &end).await;
    let booking_id = booking["id"].as_i64().unwrap();

    // the owner cannot cancel on the booker's behalf
    let req = test::TestRequest::delete()
        .uri(&format!("/bookings/{booking_id}"))
        .insert_header((SHARER_USER_ID, owner.to_string()))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/bookings/{booking_id}"))
        .insert_header((SHARER_USER_ID, booker.to_string()))
        .to_request();
    let canceled: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(canceled["status"], "CANCELED");

    // REJECTED listing covers canceled bookings too
    let req = test::TestRequest::get()
        .uri("/bookings?state=REJECTED")
        .insert_header((SHARER_USER_ID, booker.to_string()))
        .to_request();
    let rejected: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rejected.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_unknown_state_filter_is_a_validation_error() {
    let app = test::init_service(create_app(common::mock_state())).await;
    let booker = create_user(&app, "Bob", "b@x.com").await;

    let req = test::TestRequest::get()
        .uri("/bookings?state=SOMEDAY")
        .insert_header((SHARER_USER_ID, booker.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation error");
    assert!(body["message"].as_str().unwrap().contains("SOMEDAY"));
}

#[actix_web::test]
async fn test_listings_are_sorted_newest_first() {
    let app = test::init_service(create_app(common::mock_state())).await;
    let owner = create_user(&app, "Alice", "a@x.com").await;
    let booker = create_user(&app, "Bob", "b@x.com").await;
    let item = create_item(&app, owner).await;

    let (early_start, early_end) = window(1, 1);
    let (late_start, late_end) = window(5, 1);
    let early = book(&app, booker, item, &early_start, &early_end).await;
    let late = book(&app, booker, item, &late_start, &late_end).await;

    let req = test::TestRequest::get()
        .uri("/bookings?state=ALL")
        .insert_header((SHARER_USER_ID, booker.to_string()))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], late["id"]);
    assert_eq!(listed[1]["id"], early["id"]);
}
