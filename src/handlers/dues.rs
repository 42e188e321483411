use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::Utc;
use compute::dues::generate_for_month;
use model::entities::{adherent, monthly_due};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiResponse, AppState};

/// Request body for bulk-generating a month's dues
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct GenerateDuesRequest {
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
}

/// Outcome of a bulk due-generation run
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateDuesResponse {
    pub created_count: u64,
    /// Pairs that already had a due for the period
    pub skipped_count: u64,
}

/// Monthly due response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DueResponse {
    pub id: i32,
    pub adherent_id: i32,
    pub due_type_id: i32,
    pub year: i32,
    pub month: i32,
    pub expected_amount: Decimal,
    pub paid_amount: Decimal,
    pub remaining_amount: Decimal,
    pub status: String,
}

impl From<monthly_due::Model> for DueResponse {
    fn from(model: monthly_due::Model) -> Self {
        Self {
            id: model.id,
            adherent_id: model.adherent_id,
            due_type_id: model.due_type_id,
            year: model.year,
            month: model.month,
            expected_amount: model.expected_amount,
            paid_amount: model.paid_amount,
            remaining_amount: model.remaining_amount,
            status: format!("{:?}", model.status),
        }
    }
}

/// Generate the month's dues for all active adherents from all active due
/// types. Safe to re-run: existing dues for the period are skipped.
#[utoipa::path(
    post,
    path = "/api/v1/dues/generate",
    tag = "dues",
    request_body = GenerateDuesRequest,
    responses(
        (status = 200, description = "Dues generated", body = ApiResponse<GenerateDuesResponse>),
        (status = 400, description = "Invalid request", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn generate_dues(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<GenerateDuesRequest>>,
) -> Result<Json<ApiResponse<GenerateDuesResponse>>, StatusCode> {
    let today = Utc::now().date_naive();

    match generate_for_month(&state.db, request.year, request.month, today).await {
        Ok(summary) => {
            info!(
                "Generated {} dues for {}-{:02} ({} skipped)",
                summary.created_count, request.year, request.month, summary.skipped_count
            );
            // New dues change the receivable figures
            state.cache.invalidate_all();
            let response = ApiResponse {
                data: GenerateDuesResponse {
                    created_count: summary.created_count,
                    skipped_count: summary.skipped_count,
                },
                message: "Dues generated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!(
                "Failed to generate dues for {}-{:02}: {}",
                request.year, request.month, e
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all dues of one adherent, newest period first
#[utoipa::path(
    get,
    path = "/api/v1/adherents/{adherent_id}/dues",
    tag = "dues",
    params(
        ("adherent_id" = i32, Path, description = "Adherent ID"),
    ),
    responses(
        (status = 200, description = "Dues retrieved successfully", body = ApiResponse<Vec<DueResponse>>),
        (status = 404, description = "Adherent not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_adherent_dues(
    Path(adherent_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DueResponse>>>, StatusCode> {
    // The adherent must exist for the listing to mean anything
    match adherent::Entity::find_by_id(adherent_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Adherent with ID {} not found", adherent_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to verify adherent {}: {}", adherent_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    match monthly_due::Entity::find()
        .filter(monthly_due::Column::AdherentId.eq(adherent_id))
        .order_by_desc(monthly_due::Column::Year)
        .order_by_desc(monthly_due::Column::Month)
        .all(&state.db)
        .await
    {
        Ok(dues) => {
            let response = ApiResponse {
                data: dues.into_iter().map(DueResponse::from).collect(),
                message: "Dues retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve dues for adherent {}: {}",
                adherent_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
