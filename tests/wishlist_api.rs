//! HTTP-level tests for the wishlist endpoints, run against the in-memory
//! repository and the in-process event bus.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;
use tower::ServiceExt;

use wishlist_service::api::build_app;
use wishlist_service::app_state::AppState;
use wishlist_service::domain::{EventBus, WishlistEvent, WishlistEventType, WishlistId};
use wishlist_service::persistence::InMemoryWishlistRepository;
use wishlist_service::service::WishlistService;

struct Harness {
    app: Router,
    events: Receiver<WishlistEvent>,
}

fn harness() -> Harness {
    let bus = EventBus::new(64);
    let events = bus.subscribe();
    let service = WishlistService::new(
        Arc::new(InMemoryWishlistRepository::new()),
        Arc::new(bus),
    );
    Harness {
        app: build_app(AppState::new(service)),
        events,
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    };
    let Ok(request) = request else {
        panic!("invalid request");
    };

    let Ok(response) = app.clone().oneshot(request).await else {
        panic!("router failed");
    };
    let status = response.status();
    let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
        panic!("unreadable body");
    };
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create(app: &Router, user_id: i64, product_variation_id: i64) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/wishlist/",
        Some(json!({"user_id": user_id, "product_variation_id": product_variation_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn drain(events: &mut Receiver<WishlistEvent>) {
    while events.try_recv().is_ok() {}
}

#[tokio::test]
async fn create_is_idempotent_on_natural_key() {
    let mut h = harness();
    let first = create(&h.app, 1, 100).await;
    let second = create(&h.app, 1, 100).await;

    assert_eq!(first["id"], second["id"]);

    let (_, list) = send(&h.app, Method::GET, "/api/v1/wishlist/user/1", None).await;
    assert_eq!(list["items"].as_array().map(Vec::len), Some(1));

    // Both calls announce the item.
    for _ in 0..2 {
        let Ok(event) = h.events.try_recv() else {
            panic!("expected created event");
        };
        assert_eq!(event.event_type, WishlistEventType::Created);
    }
}

#[tokio::test]
async fn create_keeps_first_cached_fields() {
    let h = harness();
    let (status, first) = send(
        &h.app,
        Method::POST,
        "/api/v1/wishlist",
        Some(json!({"user_id": 4, "product_variation_id": 40, "product_name": "Mug",
                    "product_price": 1200, "product_image": "https://cdn.example/mug.png"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["product_name"], "Mug");
    assert_eq!(first["product_price"], 1200);
    assert!(first["created_at"].is_string());
    assert!(first["updated_at"].is_null());

    let (_, again) = send(
        &h.app,
        Method::POST,
        "/api/v1/wishlist/",
        Some(json!({"user_id": 4, "product_variation_id": 40, "product_name": "Big mug"})),
    )
    .await;
    assert_eq!(again["product_name"], "Mug");
}

#[tokio::test]
async fn delete_missing_id_is_404_without_event() {
    let mut h = harness();
    let (status, body) = send(&h.app, Method::DELETE, "/api/v1/wishlist/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);
    assert!(matches!(h.events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn delete_existing_id_emits_one_deleted_event() {
    let mut h = harness();
    let item = create(&h.app, 2, 200).await;
    drain(&mut h.events);

    let uri = format!("/api/v1/wishlist/{}", item["id"]);
    let (status, body) = send(&h.app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let Ok(event) = h.events.try_recv() else {
        panic!("expected deleted event");
    };
    assert_eq!(event.event_type, WishlistEventType::Deleted);
    assert_eq!(event.data.user_id, 2);
    assert_eq!(event.data.product_variation_id, 200);
    assert_eq!(Some(event.data.wishlist_id.get()), item["id"].as_i64());
    assert!(matches!(h.events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn list_pages_newest_first_with_page_sized_total() {
    let h = harness();
    for variation in 1..=5 {
        create(&h.app, 1, variation).await;
    }
    create(&h.app, 2, 1).await;

    let (status, body) = send(&h.app, Method::GET, "/api/v1/wishlist/user/1?limit=2", None).await;
    assert_eq!(status, StatusCode::OK);

    let Some(items) = body["items"].as_array() else {
        panic!("items must be an array");
    };
    let variations: Vec<i64> = items
        .iter()
        .filter_map(|i| i["product_variation_id"].as_i64())
        .collect();
    assert_eq!(variations, vec![5, 4]);
    assert_eq!(body["total"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["size"], 2);

    let (_, third_page) =
        send(&h.app, Method::GET, "/api/v1/wishlist/user/1?skip=4&limit=2", None).await;
    assert_eq!(third_page["page"], 3);
    assert_eq!(third_page["total"], 1);
}

#[tokio::test]
async fn list_rejects_out_of_range_pagination() {
    let h = harness();
    for query in ["limit=0", "limit=1001", "skip=-1"] {
        let uri = format!("/api/v1/wishlist/user/1?{query}");
        let (status, _) = send(&h.app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{query}");
    }
}

#[tokio::test]
async fn list_defaults_to_first_hundred() {
    let h = harness();
    let (status, body) = send(&h.app, Method::GET, "/api/v1/wishlist/user/77", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], 0);
    assert_eq!(body["page"], 1);
    assert_eq!(body["size"], 100);
}

#[tokio::test]
async fn delete_by_natural_key_publishes_nothing() {
    let mut h = harness();
    let (status, _) = send(
        &h.app,
        Method::DELETE,
        "/api/v1/wishlist/user/3/product/300",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    create(&h.app, 3, 300).await;
    drain(&mut h.events);

    let (status, _) = send(
        &h.app,
        Method::DELETE,
        "/api/v1/wishlist/user/3/product/300",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(matches!(h.events.try_recv(), Err(TryRecvError::Empty)));

    let (_, list) = send(&h.app, Method::GET, "/api/v1/wishlist/user/3", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn create_list_delete_scenario() {
    let mut h = harness();

    let item = create(&h.app, 1, 100).await;
    let Some(id) = item["id"].as_i64() else {
        panic!("generated id expected");
    };

    let (_, list) = send(&h.app, Method::GET, "/api/v1/wishlist/user/1", None).await;
    assert_eq!(list["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(list["items"][0]["id"], id);
    drain(&mut h.events);

    let uri = format!("/api/v1/wishlist/{id}");
    let (status, _) = send(&h.app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let Ok(event) = h.events.try_recv() else {
        panic!("expected deleted event");
    };
    assert_eq!(event.event_type, WishlistEventType::Deleted);
    assert_eq!(event.data.wishlist_id, WishlistId::new(id));
    assert_eq!(event.data.user_id, 1);
    assert_eq!(event.data.product_variation_id, 100);
    assert_eq!(event.service, "wishlist-service");
    assert_eq!(event.version, "1.0");

    let (status, _) = send(&h.app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_rejects_overlong_product_name() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        Method::POST,
        "/api/v1/wishlist/",
        Some(json!({"user_id": 1, "product_variation_id": 1, "product_name": "n".repeat(256)})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 1001);
}

#[tokio::test]
async fn health_reports_service() {
    let h = harness();
    let (status, body) = send(&h.app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "service": "wishlist"}));
}

#[tokio::test]
async fn malformed_bodies_and_queries_use_error_envelope() {
    let h = harness();

    let Ok(request) = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/wishlist/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
    else {
        panic!("invalid request");
    };
    let Ok(response) = h.app.clone().oneshot(request).await else {
        panic!("router failed");
    };
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/api/v1/wishlist/",
        Some(json!({"user_id": "one", "product_variation_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 1001);

    let (status, _) = send(&h.app, Method::GET, "/api/v1/wishlist/user/1?skip=abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn non_integer_path_segments_are_validation_errors() {
    let mut h = harness();
    let requests = [
        (Method::DELETE, "/api/v1/wishlist/abc"),
        (Method::DELETE, "/api/v1/wishlist/user/1/product/xyz"),
        (Method::GET, "/api/v1/wishlist/user/abc"),
    ];
    for (method, uri) in requests {
        let (status, body) = send(&h.app, method, uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(body["error"]["code"], 1001, "{uri}");
        assert!(body["error"]["message"].is_string(), "{uri}");
    }
    assert!(matches!(h.events.try_recv(), Err(TryRecvError::Empty)));
}
