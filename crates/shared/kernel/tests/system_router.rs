#![cfg(feature = "server")]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use castellan_kernel::domain::config::ApiConfig;
use castellan_kernel::domain::registry::{FeatureSlice, InitializedSlice};
use castellan_kernel::server::router::system_router;
use castellan_kernel::server::{ApiState, ApiStateError};
use std::any::Any;
use tower::ServiceExt;

#[derive(Debug)]
struct Moat;

impl FeatureSlice for Moat {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn state() -> ApiState {
    ApiState::builder()
        .config(ApiConfig::default())
        .register_slice(InitializedSlice::new(Moat))
        .build()
        .unwrap()
}

#[tokio::test]
async fn health_lists_registered_slices() {
    let (router, _api) = system_router().split_for_parts();
    let response = router
        .with_state(state())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(json["status"], "up");
    assert_eq!(json["slices"][0], "Moat");
}

#[test]
fn slices_are_looked_up_by_type() {
    let state = state();
    assert!(state.get_slice::<Moat>().is_some());
    assert_eq!(state.config.server.port, 4583);
}

#[test]
fn builder_requires_config() {
    let err = ApiState::builder().build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));
}
