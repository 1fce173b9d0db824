use crate::adapters::{ReportedPlatform, WebPushSender};
use crate::ports::push::PushSender;
use crate::ports::store::SubscriptionStore;
use crate::push::manager::NotificationManager;
use crate::push::{self as push_service, VapidConfig};
use crate::state;
use crate::types::push::{
    NotificationPayload, NotificationPreferences, PermissionStatus, Subscription,
};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use std::sync::Arc;

#[derive(Serialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: &'static str,
}

#[derive(Serialize)]
pub(crate) struct PublicKeyResponse {
    #[serde(rename = "publicKey")]
    pub(crate) public_key: String,
}

pub(crate) async fn push_public_key(
    State(state): State<state::AppState>,
) -> Result<Json<PublicKeyResponse>, (StatusCode, Json<ErrorResponse>)> {
    let vapid = require_vapid(&state)?;
    Ok(Json(PublicKeyResponse {
        public_key: vapid.public_key,
    }))
}

/// Outcomes of the browser's platform calls, reported with each lifecycle
/// request and replayed through [`ReportedPlatform`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PlatformReport {
    pub(crate) worker_support: bool,
    pub(crate) push_support: bool,
    pub(crate) notification_support: bool,
    pub(crate) worker_registered: bool,
    pub(crate) permission: PermissionStatus,
    pub(crate) subscription: Option<Subscription>,
}

impl From<PlatformReport> for ReportedPlatform {
    fn from(report: PlatformReport) -> Self {
        ReportedPlatform {
            worker_support: report.worker_support,
            push_support: report.push_support,
            notification_support: report.notification_support,
            worker_registered: report.worker_registered,
            permission: report.permission,
            subscription: report.subscription,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct SubscribeResponse {
    pub(crate) subscribed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) subscription: Option<Subscription>,
}

pub(crate) async fn push_subscribe(
    State(state): State<state::AppState>,
    Json(report): Json<PlatformReport>,
) -> Result<Json<SubscribeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let vapid = require_vapid(&state)?;
    let mut manager = manager_for(&state, report);

    match manager.subscribe(&vapid.public_key).await {
        Ok(Some(subscription)) => Ok(Json(SubscribeResponse {
            subscribed: true,
            subscription: Some(subscription),
        })),
        Ok(None) => Ok(Json(SubscribeResponse {
            subscribed: false,
            subscription: None,
        })),
        Err(err) => {
            eprintln!("push subscribe error: {err}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to enable notifications.",
                }),
            ))
        }
    }
}

pub(crate) async fn push_unsubscribe(
    State(state): State<state::AppState>,
    Json(report): Json<PlatformReport>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let mut manager = manager_for(&state, report);

    if let Err(err) = manager.unsubscribe().await {
        eprintln!("push unsubscribe error: {err}");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to disable notifications.",
            }),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub(crate) struct PushStatusResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) subscription: Option<Subscription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) preferences: Option<NotificationPreferences>,
}

pub(crate) async fn push_status(
    State(state): State<state::AppState>,
    Json(report): Json<PlatformReport>,
) -> Result<Json<PushStatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut manager = manager_for(&state, report);
    if let Err(err) = manager.initialize().await {
        eprintln!("delivery worker registration failed: {err}");
    }

    let subscription = manager.subscription().await.map_err(|err| {
        eprintln!("push status error: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to read subscription state.",
            }),
        )
    })?;
    let preferences = manager.preferences().map_err(|err| {
        eprintln!("push status error: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to read notification preferences.",
            }),
        )
    })?;

    Ok(Json(PushStatusResponse {
        subscription,
        preferences,
    }))
}

pub(crate) async fn get_preferences(
    State(state): State<state::AppState>,
) -> Result<Json<Option<NotificationPreferences>>, (StatusCode, Json<ErrorResponse>)> {
    let preferences = state.store.load_preferences().map_err(|err| {
        eprintln!("preferences read error: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to read notification preferences.",
            }),
        )
    })?;
    Ok(Json(preferences))
}

pub(crate) async fn put_preferences(
    State(state): State<state::AppState>,
    Json(preferences): Json<NotificationPreferences>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.store.save_preferences(&preferences).map_err(|err| {
        eprintln!("preferences write error: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to save notification preferences.",
            }),
        )
    })?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TestPushRequest {
    pub(crate) message: Option<String>,
    pub(crate) subscription: Option<Subscription>,
}

#[derive(Serialize)]
pub(crate) struct TestPushResponse {
    pub(crate) status: &'static str,
}

/// Sends a one-off notification to the stored (or an explicitly supplied)
/// subscription. This is the only in-repo use of the delivery seam; the
/// outage-driven delivery pipeline lives upstream.
pub(crate) async fn push_test(
    State(state): State<state::AppState>,
    Json(request): Json<TestPushRequest>,
) -> Result<Json<TestPushResponse>, (StatusCode, Json<ErrorResponse>)> {
    let vapid = require_vapid(&state)?;

    let subscription = match request.subscription {
        Some(subscription) => subscription,
        None => state
            .store
            .load_subscription()
            .map_err(|err| {
                eprintln!("push test error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to read subscription state.",
                    }),
                )
            })?
            .ok_or((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "No subscription to notify.",
                }),
            ))?,
    };

    let body = request
        .message
        .as_deref()
        .unwrap_or("Test notification")
        .trim();
    if body.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message must not be empty.",
            }),
        ));
    }

    let payload = NotificationPayload {
        title: state.config.app_name.clone(),
        body: body.to_string(),
        icon: None,
        data: None,
        actions: Vec::new(),
    };
    let message = serde_json::to_string(&payload).map_err(|err| {
        eprintln!("push test error: failed to encode payload ({err})");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to encode notification payload.",
            }),
        )
    })?;

    let sender = WebPushSender::new(vapid).map_err(|err| {
        eprintln!("push test error: failed to init web-push ({err})");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to initialize push sender.",
            }),
        )
    })?;

    if let Err(err) = sender.send(&subscription, &message).await {
        eprintln!("push test error: {err}");
        return Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: "Failed to send test notification.",
            }),
        ));
    }

    Ok(Json(TestPushResponse { status: "sent" }))
}

fn manager_for(
    state: &state::AppState,
    report: PlatformReport,
) -> NotificationManager<ReportedPlatform, Arc<crate::adapters::JsonFileStore>> {
    NotificationManager::new(ReportedPlatform::from(report), Arc::clone(&state.store))
}

fn require_vapid(
    state: &state::AppState,
) -> Result<VapidConfig, (StatusCode, Json<ErrorResponse>)> {
    match push_service::load_vapid_config(&state.config) {
        push_service::VapidConfigStatus::Ready(vapid) => Ok(vapid),
        push_service::VapidConfigStatus::Incomplete | push_service::VapidConfigStatus::Missing => {
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "Push notifications are not configured.",
                }),
            ))
        }
    }
}
