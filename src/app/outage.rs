use crate::adapters::{ReportedLocation, TokioTimeProvider};
use crate::location::LocationResolver;
use crate::ports::location::LocationError;
use crate::state;
use crate::types::geo::Coordinates;
use crate::types::outage::OutageStatus;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use super::push::ErrorResponse;

/// The client reports the outcome of its geolocation call: either a
/// coordinate pair or the failure class under `error`.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusQuery {
    lat: Option<f64>,
    lng: Option<f64>,
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusResponse {
    pub(crate) location: Coordinates,
    pub(crate) using_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) fallback_reason: Option<String>,
    pub(crate) status: OutageStatus,
}

pub(crate) async fn outage_status(
    State(state): State<state::AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let resolver = LocationResolver::new(reported_source(&query), TokioTimeProvider);
    let fix = resolver.resolve().await;

    let status = state
        .outage
        .check_outage(fix.coordinates)
        .await
        .map_err(|_| {
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Outage status is currently unavailable.",
                }),
            )
        })?;

    Ok(Json(StatusResponse {
        location: fix.coordinates,
        using_fallback: fix.using_fallback,
        fallback_reason: fix.reason,
        status,
    }))
}

fn reported_source(query: &StatusQuery) -> ReportedLocation {
    if let Some(kind) = query.error.as_deref() {
        let err = match kind {
            "denied" => LocationError::PermissionDenied,
            "unavailable" => LocationError::Unavailable,
            "timeout" => LocationError::Timeout,
            _ => LocationError::Unsupported,
        };
        return ReportedLocation::failed(err);
    }

    match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => match Coordinates::new(lat, lng) {
            Ok(coords) => ReportedLocation::fixed(coords),
            Err(err) => {
                eprintln!("rejecting reported coordinates: {err}");
                ReportedLocation::failed(LocationError::Unavailable)
            }
        },
        _ => ReportedLocation::failed(LocationError::Unsupported),
    }
}
