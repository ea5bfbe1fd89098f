#![cfg(feature = "server")]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use castellan_kernel::domain::config::ApiConfig;
use castellan_kernel::server::ApiState;
use castellan_navigation::server::router;
use serde_json::Value;
use tower::ServiceExt;

async fn get(uri: &str) -> (StatusCode, Value) {
    let config = ApiConfig::default();
    let slice = castellan_navigation::init(config.site).unwrap();
    let state = ApiState::builder().config(config).register_slice(slice).build().unwrap();
    let (router, _api) = router().split_for_parts();

    let response =
        router.with_state(state).oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn primary_selection_lands_on_the_form() {
    let (status, json) = get("/api/navigation?title=Hunter%27s%20Lodge").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["href"], "/accommodation?type=hunters-lodge#form");
    assert_eq!(json["typeParam"], "hunters-lodge");
    assert_eq!(json["scroll"]["offset"], 100);
    assert_eq!(json["scroll"]["durationMs"], 1000);
}

#[tokio::test]
async fn learn_more_has_no_scroll_plan() {
    let (status, json) = get("/api/navigation?title=Weddings&variant=learn-more").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["href"], "/events#events");
    assert!(json.get("scroll").is_none());
    assert!(json.get("typeParam").is_none());
}

#[tokio::test]
async fn unknown_title_is_not_found() {
    let (status, json) = get("/api/navigation?title=Moat%20Swim").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "mismatch");
}

#[tokio::test]
async fn lists_the_route_table() {
    let (status, json) = get("/api/navigation/routes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 11);
    assert_eq!(json[10]["primary"], "/canta-cuisine#form");
    assert_eq!(json[10]["learnMore"], "/canta-cuisine#dining");
}
