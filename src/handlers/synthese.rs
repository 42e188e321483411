use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use common::FinancialSynthesis;
use compute::default_synthesis;
use tracing::{debug, error, instrument, warn};

use crate::schemas::{ApiResponse, AppState, CachedData};

const SYNTHESIS_CACHE_KEY: &str = "synthese";

/// Header carrying the admin token for the report endpoints.
const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Checks the admin token before anything touches the data store.
fn check_admin(headers: &HeaderMap, state: &AppState) -> Result<(), StatusCode> {
    let presented = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(token) if token == state.admin_token => Ok(()),
        Some(_) => {
            warn!("Synthesis request with a wrong admin token");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            warn!("Synthesis request without an admin token");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Get the full financial synthesis report.
///
/// Admin-only: the caller must present the configured token in the
/// X-Admin-Token header. The report is recomputed over the current dataset
/// and cached for a short TTL.
#[utoipa::path(
    get,
    path = "/api/v1/synthese",
    tag = "synthese",
    params(
        ("X-Admin-Token" = String, Header, description = "Admin token"),
    ),
    responses(
        (status = 200, description = "Synthesis report computed", body = ApiResponse<FinancialSynthesis>),
        (status = 401, description = "Missing or invalid admin token", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn get_synthese(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FinancialSynthesis>>, StatusCode> {
    // Authorization is checked before any query is issued
    check_admin(&headers, &state)?;

    // Check cache first
    if let Some(CachedData::Synthesis(report)) = state.cache.get(SYNTHESIS_CACHE_KEY).await {
        debug!("Synthesis served from cache");
        let response = ApiResponse {
            data: report,
            message: "Synthesis report retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let report = match default_synthesis(&state.db, None).await {
        Ok(report) => report,
        Err(e) => {
            // Log the cause server-side, return an opaque failure
            error!("Failed to compute synthesis report: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Cache the result
    state
        .cache
        .insert(
            SYNTHESIS_CACHE_KEY.to_string(),
            CachedData::Synthesis(report.clone()),
        )
        .await;

    let response = ApiResponse {
        data: report,
        message: "Synthesis report computed successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
