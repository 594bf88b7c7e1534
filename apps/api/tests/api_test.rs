//! End-to-end tests driving the router in-process against an in-memory
//! database. No socket is bound; requests go through `tower::ServiceExt`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use busline_api::app;
use busline_core::NewBus;
use busline_db::{Database, DbConfig};

/// Fresh app with one 40-seat bus and one registered rider.
///
/// Returns (router, bus_id, user_id).
async fn test_app() -> (Router, i64, i64) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let bus = db
        .buses()
        .insert_with_seats(
            &NewBus {
                name: "Subash Express".into(),
                origin: "Tiruvannamalai".into(),
                destination: "Chennai".into(),
                distance_km: 190,
                start_time: "07:00:00".into(),
                end_time: "11:00:00".into(),
                travel_time: "4h".into(),
                seat_price_cents: 12000,
            },
            40,
        )
        .await
        .unwrap();

    let user = db
        .accounts()
        .register("Asha", "asha@example.com", "9876543210", "hunter2-secure")
        .await
        .unwrap();

    (app(db), bus.id, user.id)
}

async fn send(router: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_check() {
    let (router, _, _) = test_app().await;

    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_login_flow() {
    let (router, _, _) = test_app().await;

    let (status, body) = send(
        &router,
        "POST",
        "/register",
        Some(json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "phone": "9876500000",
            "password": "hunter2-secure"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["wallet_cents"], 0);

    // Duplicate phone
    let (status, body) = send(
        &router,
        "POST",
        "/register",
        Some(json!({
            "name": "Imposter",
            "email": "other@example.com",
            "phone": "9876500000",
            "password": "hunter2-secure"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    // Malformed email
    let (status, body) = send(
        &router,
        "POST",
        "/register",
        Some(json!({
            "name": "Typo",
            "email": "not-an-email",
            "phone": "9876511111",
            "password": "hunter2-secure"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");

    // Login with phone
    let (status, body) = send(
        &router,
        "POST",
        "/login",
        Some(json!({ "phone": "9876500000", "password": "hunter2-secure" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ravi");

    let (status, body) = send(
        &router,
        "POST",
        "/login",
        Some(json!({ "phone": "9876500000", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn catalog_and_seat_map() {
    let (router, bus_id, _) = test_app().await;

    let (status, body) = send(&router, "GET", "/buses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Subash Express");
    assert_eq!(body[0]["available_seats"], 40);

    let (status, body) = send(&router, "GET", &format!("/buses/{bus_id}/seats"), None).await;
    assert_eq!(status, StatusCode::OK);
    let seats = body.as_array().unwrap();
    assert_eq!(seats.len(), 40);
    assert_eq!(seats[0]["seat_no"], 1);
    assert_eq!(seats[0]["status"], "available");
    // Seat 6 sits in the second row, second column
    assert_eq!(seats[5]["row_no"], 1);
    assert_eq!(seats[5]["col_no"], 1);

    let (status, _) = send(&router, "GET", "/buses/999/seats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reserve_and_conflict() {
    let (router, bus_id, user_id) = test_app().await;

    let (status, body) = send(
        &router,
        "POST",
        "/reservations",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_no": 7, "cost_cents": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seat_no"], 7);
    assert_eq!(body["cost_cents"], 12000);

    // Same seat again: conflict, counter untouched
    let (status, body) = send(
        &router,
        "POST",
        "/reservations",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_no": 7, "cost_cents": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    let (_, buses) = send(&router, "GET", "/buses", None).await;
    assert_eq!(buses[0]["available_seats"], 39);

    // Seat that does not exist on the bus
    let (status, _) = send(
        &router,
        "POST",
        "/reservations",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_no": 99, "cost_cents": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Seat number that fails shape validation
    let (status, _) = send(
        &router,
        "POST",
        "/reservations",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_no": 0, "cost_cents": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn batch_booking_is_atomic() {
    let (router, bus_id, user_id) = test_app().await;

    // Take seat 4 first
    let (status, _) = send(
        &router,
        "POST",
        "/reservations",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_no": 4, "cost_cents": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Batch hitting the taken seat fails whole
    let (status, _) = send(
        &router,
        "POST",
        "/reservations/batch",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_nos": [3, 4, 5], "price_per_seat_cents": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, seats) = send(&router, "GET", &format!("/buses/{bus_id}/seats"), None).await;
    assert_eq!(seats[2]["status"], "available"); // seat 3
    assert_eq!(seats[4]["status"], "available"); // seat 5

    // Clean batch succeeds with a full receipt
    let (status, body) = send(
        &router,
        "POST",
        "/reservations/batch",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_nos": [3, 5], "price_per_seat_cents": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booked"], 2);
    assert_eq!(body["total_cost_cents"], 24000);

    // Duplicate seat numbers are rejected before touching the ledger
    let (status, _) = send(
        &router,
        "POST",
        "/reservations/batch",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_nos": [8, 8], "price_per_seat_cents": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cancel_roundtrip() {
    let (router, bus_id, user_id) = test_app().await;

    send(
        &router,
        "POST",
        "/reservations",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_no": 7, "cost_cents": 12000 })),
    )
    .await;

    let (status, body) = send(
        &router,
        "POST",
        "/reservations/cancel",
        Some(json!({ "bus_id": bus_id, "seat_no": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Reservation cancelled.");

    let (_, buses) = send(&router, "GET", "/buses", None).await;
    assert_eq!(buses[0]["available_seats"], 40);

    // Cancelling again: nothing to cancel
    let (status, _) = send(
        &router,
        "POST",
        "/reservations/cancel",
        Some(json!({ "bus_id": bus_id, "seat_no": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Freed seat is bookable again
    let (status, _) = send(
        &router,
        "POST",
        "/reservations",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_no": 7, "cost_cents": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn history_and_profile() {
    let (router, bus_id, user_id) = test_app().await;

    // Empty history is a distinct 404, not an empty list
    let (status, body) = send(
        &router,
        "GET",
        &format!("/users/{user_id}/reservations"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No reservations found for this user.");

    send(
        &router,
        "POST",
        "/reservations",
        Some(json!({ "user_id": user_id, "bus_id": bus_id, "seat_no": 12, "cost_cents": 12000 })),
    )
    .await;

    let (status, body) = send(
        &router,
        "GET",
        &format!("/users/{user_id}/reservations"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let views = body.as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["seat_no"], 12);
    assert_eq!(views[0]["bus_name"], "Subash Express");
    assert_eq!(views[0]["origin"], "Tiruvannamalai");

    let (status, body) = send(&router, "GET", &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["wallet_cents"], 0);

    let (status, _) = send(&router, "GET", "/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
