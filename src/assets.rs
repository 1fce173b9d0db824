use crate::state::AppState;
use crate::templates;

use askama::Template;
use axum::extract::State;

pub(crate) async fn stylesheet() -> axum::response::Response {
    const CSS_CONTENT: &str = include_str!("../static/style.css");
    axum::response::Response::builder()
        .status(200)
        .header("content-type", "text/css")
        .header("cache-control", "public, max-age=3600")
        .body(CSS_CONTENT.into())
        .unwrap()
}

pub(crate) async fn app_script() -> axum::response::Response {
    const APP_JS_CONTENT: &str = include_str!("../static/app.js");
    axum::response::Response::builder()
        .status(200)
        .header("content-type", "application/javascript")
        .header("cache-control", "public, max-age=3600")
        .body(APP_JS_CONTENT.into())
        .unwrap()
}

pub(crate) async fn push_script() -> axum::response::Response {
    const PUSH_JS_CONTENT: &str = include_str!("../static/push.js");
    axum::response::Response::builder()
        .status(200)
        .header("content-type", "application/javascript")
        .header("cache-control", "public, max-age=3600")
        .body(PUSH_JS_CONTENT.into())
        .unwrap()
}

pub(crate) async fn service_worker() -> axum::response::Response {
    const SW_CONTENT: &str = include_str!("../static/sw.js");
    axum::response::Response::builder()
        .status(200)
        .header("content-type", "application/javascript")
        .header("cache-control", "no-cache")
        .body(SW_CONTENT.into())
        .unwrap()
}

pub(crate) async fn icon() -> axum::response::Response {
    const ICON_CONTENT: &str = include_str!("../static/icons/icon.svg");
    axum::response::Response::builder()
        .status(200)
        .header("content-type", "image/svg+xml")
        .header("cache-control", "public, max-age=86400")
        .body(ICON_CONTENT.into())
        .unwrap()
}

pub(crate) async fn manifest(State(state): State<AppState>) -> axum::response::Response {
    let manifest = templates::ManifestTemplate {
        app_name: &state.config.app_name,
    }
    .render()
    .expect("render manifest template");
    axum::response::Response::builder()
        .status(200)
        .header("content-type", "application/manifest+json")
        .header("cache-control", "public, max-age=3600")
        .body(manifest.into())
        .unwrap()
}
