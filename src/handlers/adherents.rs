use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDate, Utc};
use model::entities::adherent;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiResponse, AppState};

/// Membership status as exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub enum AdherentStatus {
    Active,
    Inactive,
}

impl From<AdherentStatus> for adherent::AdherentStatus {
    fn from(status: AdherentStatus) -> Self {
        match status {
            AdherentStatus::Active => adherent::AdherentStatus::Active,
            AdherentStatus::Inactive => adherent::AdherentStatus::Inactive,
        }
    }
}

impl From<adherent::AdherentStatus> for AdherentStatus {
    fn from(status: adherent::AdherentStatus) -> Self {
        match status {
            adherent::AdherentStatus::Active => AdherentStatus::Active,
            adherent::AdherentStatus::Inactive => AdherentStatus::Inactive,
        }
    }
}

/// Request body for registering a new adherent
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateAdherentRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    /// Contact email, unique across the membership
    #[validate(email)]
    pub email: String,
    /// Defaults to today when omitted
    pub joined_on: Option<NaiveDate>,
}

/// Request body for updating an adherent
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateAdherentRequest {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub status: Option<AdherentStatus>,
}

/// Adherent response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdherentResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: AdherentStatus,
    pub joined_on: NaiveDate,
}

impl From<adherent::Model> for AdherentResponse {
    fn from(model: adherent::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            status: model.status.into(),
            joined_on: model.joined_on,
        }
    }
}

/// Register a new adherent
#[utoipa::path(
    post,
    path = "/api/v1/adherents",
    tag = "adherents",
    request_body = CreateAdherentRequest,
    responses(
        (status = 201, description = "Adherent created successfully", body = ApiResponse<AdherentResponse>),
        (status = 400, description = "Invalid request", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_adherent(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateAdherentRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<AdherentResponse>>), StatusCode> {
    debug!(
        "Creating adherent {} {} <{}>",
        request.first_name, request.last_name, request.email
    );

    let new_adherent = adherent::ActiveModel {
        first_name: Set(request.first_name.clone()),
        last_name: Set(request.last_name.clone()),
        email: Set(request.email.clone()),
        status: Set(adherent::AdherentStatus::Active),
        joined_on: Set(request
            .joined_on
            .unwrap_or_else(|| Utc::now().date_naive())),
        ..Default::default()
    };

    match new_adherent.insert(&state.db).await {
        Ok(model) => {
            info!("Adherent created successfully with ID: {}", model.id);
            let response = ApiResponse {
                data: AdherentResponse::from(model),
                message: "Adherent created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create adherent '{}': {}",
                request.email, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all adherents
#[utoipa::path(
    get,
    path = "/api/v1/adherents",
    tag = "adherents",
    responses(
        (status = 200, description = "Adherents retrieved successfully", body = ApiResponse<Vec<AdherentResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_adherents(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AdherentResponse>>>, StatusCode> {
    match adherent::Entity::find().all(&state.db).await {
        Ok(adherents) => {
            debug!("Retrieved {} adherents", adherents.len());
            let response = ApiResponse {
                data: adherents.into_iter().map(AdherentResponse::from).collect(),
                message: "Adherents retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve adherents: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific adherent by ID
#[utoipa::path(
    get,
    path = "/api/v1/adherents/{adherent_id}",
    tag = "adherents",
    params(
        ("adherent_id" = i32, Path, description = "Adherent ID"),
    ),
    responses(
        (status = 200, description = "Adherent retrieved successfully", body = ApiResponse<AdherentResponse>),
        (status = 404, description = "Adherent not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_adherent(
    Path(adherent_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AdherentResponse>>, StatusCode> {
    match adherent::Entity::find_by_id(adherent_id).one(&state.db).await {
        Ok(Some(model)) => {
            let response = ApiResponse {
                data: AdherentResponse::from(model),
                message: "Adherent retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Adherent with ID {} not found", adherent_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve adherent with ID {}: {}",
                adherent_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update an adherent
#[utoipa::path(
    put,
    path = "/api/v1/adherents/{adherent_id}",
    tag = "adherents",
    params(
        ("adherent_id" = i32, Path, description = "Adherent ID"),
    ),
    request_body = UpdateAdherentRequest,
    responses(
        (status = 200, description = "Adherent updated successfully", body = ApiResponse<AdherentResponse>),
        (status = 404, description = "Adherent not found", body = crate::schemas::ErrorResponse),
        (status = 400, description = "Invalid request", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_adherent(
    Path(adherent_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateAdherentRequest>>,
) -> Result<Json<ApiResponse<AdherentResponse>>, StatusCode> {
    let existing = match adherent::Entity::find_by_id(adherent_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Adherent with ID {} not found for update", adherent_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup adherent with ID {} for update: {}",
                adherent_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: adherent::ActiveModel = existing.into();

    // Update only provided fields
    if let Some(first_name) = request.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = request.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(email) = request.email {
        active.email = Set(email);
    }
    if let Some(status) = request.status {
        active.status = Set(status.into());
    }

    match active.update(&state.db).await {
        Ok(updated) => {
            info!("Adherent with ID {} updated successfully", adherent_id);
            let response = ApiResponse {
                data: AdherentResponse::from(updated),
                message: "Adherent updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update adherent with ID {}: {}",
                adherent_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete an adherent
#[utoipa::path(
    delete,
    path = "/api/v1/adherents/{adherent_id}",
    tag = "adherents",
    params(
        ("adherent_id" = i32, Path, description = "Adherent ID"),
    ),
    responses(
        (status = 200, description = "Adherent deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Adherent not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_adherent(
    Path(adherent_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match adherent::Entity::delete_by_id(adherent_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Adherent with ID {} deleted successfully", adherent_id);
                let response = ApiResponse {
                    data: format!("Adherent {} deleted", adherent_id),
                    message: "Adherent deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Adherent with ID {} not found for deletion (no rows affected)",
                    adherent_id
                );
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete adherent with ID {}: {}",
                adherent_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
