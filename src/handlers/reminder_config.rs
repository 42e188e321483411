use axum::{extract::State, http::StatusCode, response::Json};
use axum_valid::Valid;
use model::entities::reminder_config;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiResponse, AppState};

/// Reminder configuration response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReminderConfigResponse {
    pub enabled: bool,
    pub frequency_days: i32,
    pub minimum_amount: Decimal,
}

impl From<reminder_config::Model> for ReminderConfigResponse {
    fn from(model: reminder_config::Model) -> Self {
        Self {
            enabled: model.enabled,
            frequency_days: model.frequency_days,
            minimum_amount: model.minimum_amount,
        }
    }
}

impl Default for ReminderConfigResponse {
    fn default() -> Self {
        Self {
            enabled: false,
            frequency_days: 30,
            minimum_amount: Decimal::ZERO,
        }
    }
}

/// Request body for updating the reminder configuration
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateReminderConfigRequest {
    pub enabled: bool,
    #[validate(range(min = 1, max = 365))]
    pub frequency_days: i32,
    pub minimum_amount: Decimal,
}

/// Get the reminder configuration. Returns the defaults when nothing has
/// been persisted yet.
#[utoipa::path(
    get,
    path = "/api/v1/reminder-config",
    tag = "config",
    responses(
        (status = 200, description = "Configuration retrieved", body = ApiResponse<ReminderConfigResponse>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_reminder_config(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReminderConfigResponse>>, StatusCode> {
    match reminder_config::Entity::find().one(&state.db).await {
        Ok(Some(model)) => {
            let response = ApiResponse {
                data: ReminderConfigResponse::from(model),
                message: "Configuration retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            let response = ApiResponse {
                data: ReminderConfigResponse::default(),
                message: "No configuration persisted yet; returning defaults".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve reminder configuration: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update the reminder configuration (single-row upsert)
#[utoipa::path(
    put,
    path = "/api/v1/reminder-config",
    tag = "config",
    request_body = UpdateReminderConfigRequest,
    responses(
        (status = 200, description = "Configuration updated", body = ApiResponse<ReminderConfigResponse>),
        (status = 400, description = "Invalid request", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_reminder_config(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateReminderConfigRequest>>,
) -> Result<Json<ApiResponse<ReminderConfigResponse>>, StatusCode> {
    let existing = match reminder_config::Entity::find().one(&state.db).await {
        Ok(existing) => existing,
        Err(db_error) => {
            error!("Failed to lookup reminder configuration: {}", db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let result = match existing {
        Some(model) => {
            let mut active: reminder_config::ActiveModel = model.into();
            active.enabled = Set(request.enabled);
            active.frequency_days = Set(request.frequency_days);
            active.minimum_amount = Set(request.minimum_amount);
            active.update(&state.db).await
        }
        None => {
            reminder_config::ActiveModel {
                enabled: Set(request.enabled),
                frequency_days: Set(request.frequency_days),
                minimum_amount: Set(request.minimum_amount),
                ..Default::default()
            }
            .insert(&state.db)
            .await
        }
    };

    match result {
        Ok(model) => {
            info!("Reminder configuration updated");
            let response = ApiResponse {
                data: ReminderConfigResponse::from(model),
                message: "Configuration updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update reminder configuration: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
