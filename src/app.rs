use crate::adapters::JsonFileStore;
use crate::assets;
use crate::config;
use crate::outage::{OutageBackend, OutageService};
use crate::push as push_service;
use crate::state;
use crate::templates;

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};

use std::sync::Arc;

mod outage;
mod push;

pub fn app(config: config::AppConfig) -> Router {
    if let Err(err) = std::fs::create_dir_all(&config.data_dir) {
        panic!(
            "failed to create data directory {}: {err}",
            config.data_dir.display()
        );
    }

    match push_service::load_vapid_config(&config) {
        push_service::VapidConfigStatus::Ready(vapid) => {
            if let Err(err) = push_service::decode_server_key(&vapid.public_key) {
                eprintln!("push notifications misconfigured: {err}");
            }
        }
        push_service::VapidConfigStatus::Incomplete => {
            eprintln!("push notifications disabled: incomplete VAPID configuration");
        }
        push_service::VapidConfigStatus::Missing => {}
    }

    let store = Arc::new(JsonFileStore::new(config.data_dir.clone()));
    let outage = OutageService::new(OutageBackend::from_kind(config.outage_backend));
    let state = state::AppState {
        config,
        store,
        outage,
    };

    Router::new()
        .route("/", get(index))
        .route("/api/outage/status", get(outage::outage_status))
        .route("/api/push/public-key", get(push::push_public_key))
        .route("/api/push/status", post(push::push_status))
        .route("/api/push/subscribe", post(push::push_subscribe))
        .route("/api/push/unsubscribe", post(push::push_unsubscribe))
        .route(
            "/api/push/preferences",
            get(push::get_preferences).put(push::put_preferences),
        )
        .route("/api/push/test", post(push::push_test))
        .route("/static/style.css", get(assets::stylesheet))
        .route("/static/app.js", get(assets::app_script))
        .route("/static/push.js", get(assets::push_script))
        .route("/static/manifest.json", get(assets::manifest))
        .route("/static/icons/icon.svg", get(assets::icon))
        .route("/sw.js", get(assets::service_worker))
        .route("/health", get(health))
        .with_state(state)
}

async fn index(State(state): State<state::AppState>) -> templates::IndexTemplate {
    templates::IndexTemplate::new(state.config.app_name.clone(), state.config.locale)
}

pub(crate) async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::ports::store::SubscriptionStore;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value as JsonValue;
    use serde_json::from_slice as json_from_slice;
    use std::path::PathBuf;
    use tower::ServiceExt;

    const TEST_PRIVATE_KEY: &str = "9pKJeIXAyyCj5M0QagsVvDYHlPF-cymJCbB5iHPsdEE";
    const TEST_PUBLIC_KEY: &str = "BCRweRf_U5iQM4pKNucGRzM6OuLp8Hisa8yX0N2ePIf1oxKitvFT6qvuGgYoTxlMatMDaytXbZR3rVClc2w_p6U";

    fn create_temp_root(test_name: &str) -> PathBuf {
        let mut root = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        root.push(format!("gridmap-{}-{}", test_name, nanos));
        std::fs::create_dir_all(&root).expect("create temp dir");
        root
    }

    fn test_config(root: PathBuf) -> config::AppConfig {
        config::AppConfig {
            data_dir: root,
            ..config::AppConfig::default()
        }
    }

    fn vapid_config(root: PathBuf) -> config::AppConfig {
        let mut config = test_config(root);
        config.vapid_private_key = Some(TEST_PRIVATE_KEY.to_string());
        config.vapid_public_key = Some(TEST_PUBLIC_KEY.to_string());
        config.vapid_subject = Some("mailto:ops@example.com".to_string());
        config
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: JsonValue) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn granted_report(endpoint: &str) -> JsonValue {
        serde_json::json!({
            "workerSupport": true,
            "pushSupport": true,
            "notificationSupport": true,
            "workerRegistered": true,
            "permission": "granted",
            "subscription": {
                "endpoint": endpoint,
                "keys": {"p256dh": "p256", "auth": "auth"}
            }
        })
    }

    async fn body_json(response: axum::response::Response) -> JsonValue {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        json_from_slice(&body).expect("parse body json")
    }

    #[tokio::test]
    async fn app__should_return_ok_on_health_endpoint() {
        // Given
        let app = app(config::AppConfig::default());

        // When
        let response = app
            .oneshot(get_request("/health"))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        assert_eq!(body.as_ref(), b"ok");
    }

    #[tokio::test]
    async fn index__should_render_the_app_shell() {
        // Given
        let app = app(config::AppConfig::default());

        // When
        let response = app.oneshot(get_request("/")).await.expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let html = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(html.contains("Gridmap"));
        assert!(html.contains("/static/app.js"));
        assert!(html.contains("/static/push.js"));
    }

    #[tokio::test]
    async fn outage_status__should_report_an_outage_inside_the_mock_area() {
        // Given
        let root = create_temp_root("status-outage");
        let app = app(test_config(root.clone()));

        // When
        let response = app
            .oneshot(get_request("/api/outage/status?lat=33.5&lng=-118.0"))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["usingFallback"], false);
        assert_eq!(json["location"]["lat"], 33.5);
        assert_eq!(json["status"]["hasOutage"], true);
        assert!(json["status"]["message"].as_str().is_some_and(|m| !m.is_empty()));
        assert!(json["status"]["estimatedRestoreTime"].is_string());
        assert!(json.get("fallbackReason").is_none());

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn outage_status__should_fall_back_when_the_client_reports_denial() {
        // Given
        let root = create_temp_root("status-denied");
        let app = app(test_config(root.clone()));

        // When
        let response = app
            .oneshot(get_request("/api/outage/status?error=denied"))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["usingFallback"], true);
        assert_eq!(json["location"]["lat"], 34.0517);
        assert_eq!(json["location"]["lng"], -118.0732);
        assert_eq!(json["fallbackReason"], "location permission was denied");
        // The fallback point sits just outside the mock outage area.
        assert_eq!(json["status"]["hasOutage"], false);

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn outage_status__should_fall_back_on_out_of_range_coordinates() {
        // Given
        let root = create_temp_root("status-invalid");
        let app = app(test_config(root.clone()));

        // When
        let response = app
            .oneshot(get_request("/api/outage/status?lat=120.0&lng=0.0"))
            .await
            .expect("request failed");

        // Then
        let json = body_json(response).await;
        assert_eq!(json["usingFallback"], true);
        assert_eq!(json["location"]["lat"], 34.0517);

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn outage_status__should_fall_back_when_nothing_is_reported() {
        // Given
        let root = create_temp_root("status-missing");
        let app = app(test_config(root.clone()));

        // When
        let response = app
            .oneshot(get_request("/api/outage/status"))
            .await
            .expect("request failed");

        // Then
        let json = body_json(response).await;
        assert_eq!(json["usingFallback"], true);
        assert_eq!(
            json["fallbackReason"],
            "location services are not available on this device"
        );

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn outage_status__should_return_bad_gateway_for_the_stub_backend() {
        // Given
        let root = create_temp_root("status-stub");
        let mut config = test_config(root.clone());
        config.outage_backend = config::OutageBackendKind::Utility;
        let app = app(config);

        // When
        let response = app
            .oneshot(get_request("/api/outage/status?lat=33.5&lng=-118.0"))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert!(json["error"].is_string());

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn push_public_key__should_be_unavailable_without_configuration() {
        // Given
        let root = create_temp_root("key-missing");
        let app = app(test_config(root.clone()));

        // When
        let response = app
            .oneshot(get_request("/api/push/public-key"))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn push_public_key__should_return_the_configured_key() {
        // Given
        let root = create_temp_root("key-ready");
        let app = app(vapid_config(root.clone()));

        // When
        let response = app
            .oneshot(get_request("/api/push/public-key"))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["publicKey"], TEST_PUBLIC_KEY);

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn push_subscribe__should_persist_the_reported_subscription() {
        // Given
        let root = create_temp_root("subscribe-granted");
        let app = app(vapid_config(root.clone()));

        // When
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/push/subscribe",
                granted_report("https://push.example/abc"),
            ))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["subscribed"], true);
        assert_eq!(json["subscription"]["endpoint"], "https://push.example/abc");

        let store = JsonFileStore::new(root.clone());
        let stored = store.load_subscription().expect("load subscription");
        assert_eq!(
            stored.expect("stored subscription").endpoint,
            "https://push.example/abc"
        );

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn push_subscribe__should_not_touch_storage_when_permission_is_not_granted() {
        // Given
        let root = create_temp_root("subscribe-denied");
        let app = app(vapid_config(root.clone()));
        let report = serde_json::json!({
            "workerSupport": true,
            "pushSupport": true,
            "notificationSupport": true,
            "workerRegistered": true,
            "permission": "denied"
        });

        // When
        let response = app
            .oneshot(json_request("POST", "/api/push/subscribe", report))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["subscribed"], false);
        assert!(json.get("subscription").is_none());

        let store = JsonFileStore::new(root.clone());
        assert!(store.load_subscription().expect("load").is_none());
        assert!(store.load_preferences().expect("load").is_none());

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn push_subscribe__should_be_unavailable_without_vapid_configuration() {
        // Given
        let root = create_temp_root("subscribe-unconfigured");
        let app = app(test_config(root.clone()));

        // When
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/push/subscribe",
                granted_report("https://push.example/abc"),
            ))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn push_unsubscribe__should_be_a_no_op_without_a_subscription() {
        // Given
        let root = create_temp_root("unsubscribe-noop");
        let app = app(test_config(root.clone()));
        let report = serde_json::json!({
            "workerSupport": true,
            "pushSupport": true,
            "notificationSupport": true,
            "workerRegistered": true,
            "permission": "default"
        });

        // When
        let response = app
            .oneshot(json_request("POST", "/api/push/unsubscribe", report))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let store = JsonFileStore::new(root.clone());
        assert!(store.load_subscription().expect("load").is_none());
        assert!(store.load_preferences().expect("load").is_none());

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn push_unsubscribe__should_clear_subscription_and_preferences() {
        // Given
        let root = create_temp_root("unsubscribe-live");
        let app = app(vapid_config(root.clone()));
        let subscribe = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/push/subscribe",
                granted_report("https://push.example/abc"),
            ))
            .await
            .expect("subscribe failed");
        assert_eq!(subscribe.status(), StatusCode::OK);
        let put = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/push/preferences",
                serde_json::json!({"enabled": true, "advanceNoticeHours": 24}),
            ))
            .await
            .expect("preferences failed");
        assert_eq!(put.status(), StatusCode::NO_CONTENT);

        // When
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/push/unsubscribe",
                granted_report("https://push.example/abc"),
            ))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let store = JsonFileStore::new(root.clone());
        assert!(store.load_subscription().expect("load").is_none());
        assert!(store.load_preferences().expect("load").is_none());

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn preferences__should_round_trip_through_the_api() {
        // Given
        let root = create_temp_root("preferences-roundtrip");
        let app = app(test_config(root.clone()));
        let preferences = serde_json::json!({
            "enabled": true,
            "location": {"lat": 33.5, "lng": -118.0},
            "advanceNoticeHours": 48
        });

        // When
        let put = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/push/preferences",
                preferences.clone(),
            ))
            .await
            .expect("put failed");
        let get = app
            .oneshot(get_request("/api/push/preferences"))
            .await
            .expect("get failed");

        // Then
        assert_eq!(put.status(), StatusCode::NO_CONTENT);
        assert_eq!(get.status(), StatusCode::OK);
        let json = body_json(get).await;
        assert_eq!(json, preferences);

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn preferences__should_reject_an_unenumerated_advance_notice() {
        // Given
        let root = create_temp_root("preferences-invalid");
        let app = app(test_config(root.clone()));

        // When
        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/push/preferences",
                serde_json::json!({"enabled": true, "advanceNoticeHours": 18}),
            ))
            .await
            .expect("request failed");

        // Then
        assert!(response.status().is_client_error());

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn push_status__should_repair_storage_from_the_reported_subscription() {
        // Given: storage is empty but the platform still holds a live
        // subscription.
        let root = create_temp_root("status-repair");
        let app = app(test_config(root.clone()));

        // When
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/push/status",
                granted_report("https://push.example/live"),
            ))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["subscription"]["endpoint"], "https://push.example/live");

        let store = JsonFileStore::new(root.clone());
        let stored = store.load_subscription().expect("load subscription");
        assert_eq!(
            stored.expect("repaired subscription").endpoint,
            "https://push.example/live"
        );

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn push_status__should_report_nothing_for_an_empty_platform() {
        // Given
        let root = create_temp_root("status-empty");
        let app = app(test_config(root.clone()));

        // When
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/push/status",
                serde_json::json!({}),
            ))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json.get("subscription").is_none());
        assert!(json.get("preferences").is_none());

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn push_test__should_require_a_subscription() {
        // Given
        let root = create_temp_root("test-no-subscription");
        let app = app(vapid_config(root.clone()));

        // When
        let response = app
            .oneshot(json_request("POST", "/api/push/test", serde_json::json!({})))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn assets__should_serve_the_delivery_worker() {
        // Given
        let app = app(config::AppConfig::default());

        // When
        let response = app
            .oneshot(get_request("/sw.js"))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let script = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(script.contains("showNotification"));
        assert!(script.contains("skipWaiting"));
        assert!(script.contains("clients.claim"));
    }

    #[tokio::test]
    async fn assets__should_render_the_manifest_with_the_app_name() {
        // Given
        let app = app(config::AppConfig::default());

        // When
        let response = app
            .oneshot(get_request("/static/manifest.json"))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["name"], "Gridmap");
    }
}
