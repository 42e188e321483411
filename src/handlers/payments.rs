use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDate, Utc};
use compute::allocation::{validate_and_allocate, AllocationOutcome};
use compute::error::ComputeError;
use model::entities::{adherent, payment};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Payment method as exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub enum PaymentMethod {
    Cash,
    Cheque,
    Transfer,
    Card,
}

impl From<PaymentMethod> for payment::PaymentMethod {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Cash => payment::PaymentMethod::Cash,
            PaymentMethod::Cheque => payment::PaymentMethod::Cheque,
            PaymentMethod::Transfer => payment::PaymentMethod::Transfer,
            PaymentMethod::Card => payment::PaymentMethod::Card,
        }
    }
}

impl From<payment::PaymentMethod> for PaymentMethod {
    fn from(method: payment::PaymentMethod) -> Self {
        match method {
            payment::PaymentMethod::Cash => PaymentMethod::Cash,
            payment::PaymentMethod::Cheque => PaymentMethod::Cheque,
            payment::PaymentMethod::Transfer => PaymentMethod::Transfer,
            payment::PaymentMethod::Card => PaymentMethod::Card,
        }
    }
}

/// Request body for recording a new payment. Payments start Pending and
/// only count once validated.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreatePaymentRequest {
    pub adherent_id: i32,
    /// Must be strictly positive
    pub amount: Decimal,
    /// Defaults to today when omitted
    pub date: Option<NaiveDate>,
    pub method: PaymentMethod,
    /// Cheque number, transfer reference, etc.
    pub reference: Option<String>,
}

/// Payment response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i32,
    pub adherent_id: i32,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub status: String,
}

impl From<payment::Model> for PaymentResponse {
    fn from(model: payment::Model) -> Self {
        Self {
            id: model.id,
            adherent_id: model.adherent_id,
            amount: model.amount,
            date: model.date,
            method: model.method.into(),
            reference: model.reference,
            status: format!("{:?}", model.status),
        }
    }
}

/// What validating a payment did with its amount
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AllocationResponse {
    pub payment_id: i32,
    pub adherent_id: i32,
    pub applied_to_initial_debts: Decimal,
    pub applied_to_monthly_dues: Decimal,
    pub applied_to_assistances: Decimal,
    /// Surplus issued as a new credit, zero when fully consumed
    pub credit_issued: Decimal,
}

impl From<AllocationOutcome> for AllocationResponse {
    fn from(outcome: AllocationOutcome) -> Self {
        Self {
            payment_id: outcome.payment_id,
            adherent_id: outcome.adherent_id,
            applied_to_initial_debts: outcome.applied_to_initial_debts,
            applied_to_monthly_dues: outcome.applied_to_monthly_dues,
            applied_to_assistances: outcome.applied_to_assistances,
            credit_issued: outcome.credit_issued,
        }
    }
}

/// Record a new payment (Pending until validated)
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded successfully", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_payment(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreatePaymentRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Recording payment of {} for adherent {}",
        request.amount, request.adherent_id
    );

    if request.amount <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Payment amount must be strictly positive".to_string(),
                code: "INVALID_AMOUNT".to_string(),
                success: false,
            }),
        ));
    }

    // Verify the adherent exists before inserting
    match adherent::Entity::find_by_id(request.adherent_id)
        .one(&state.db)
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!(
                "Rejected payment for unknown adherent {}",
                request.adherent_id
            );
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Adherent with id {} does not exist", request.adherent_id),
                    code: "INVALID_ADHERENT_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to verify adherent: {}", db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "INTERNAL_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    }

    let new_payment = payment::ActiveModel {
        adherent_id: Set(request.adherent_id),
        amount: Set(request.amount),
        date: Set(request.date.unwrap_or_else(|| Utc::now().date_naive())),
        method: Set(request.method.into()),
        reference: Set(request.reference.clone()),
        status: Set(payment::PaymentStatus::Pending),
        ..Default::default()
    };

    match new_payment.insert(&state.db).await {
        Ok(model) => {
            info!("Payment recorded with ID: {}", model.id);
            let response = ApiResponse {
                data: PaymentResponse::from(model),
                message: "Payment recorded successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to record payment: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "INTERNAL_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all payments
#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "payments",
    responses(
        (status = 200, description = "Payments retrieved successfully", body = ApiResponse<Vec<PaymentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_payments(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PaymentResponse>>>, StatusCode> {
    match payment::Entity::find().all(&state.db).await {
        Ok(payments) => {
            debug!("Retrieved {} payments", payments.len());
            let response = ApiResponse {
                data: payments.into_iter().map(PaymentResponse::from).collect(),
                message: "Payments retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve payments: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific payment by ID
#[utoipa::path(
    get,
    path = "/api/v1/payments/{payment_id}",
    tag = "payments",
    params(
        ("payment_id" = i32, Path, description = "Payment ID"),
    ),
    responses(
        (status = 200, description = "Payment retrieved successfully", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_payment(
    Path(payment_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PaymentResponse>>, StatusCode> {
    match payment::Entity::find_by_id(payment_id).one(&state.db).await {
        Ok(Some(model)) => {
            let response = ApiResponse {
                data: PaymentResponse::from(model),
                message: "Payment retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Payment with ID {} not found", payment_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve payment with ID {}: {}",
                payment_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Validate a pending payment and allocate its amount to the adherent's
/// outstanding debts, dues and assistances; any surplus becomes a credit.
#[utoipa::path(
    post,
    path = "/api/v1/payments/{payment_id}/validate",
    tag = "payments",
    params(
        ("payment_id" = i32, Path, description = "Payment ID"),
    ),
    responses(
        (status = 200, description = "Payment validated and allocated", body = ApiResponse<AllocationResponse>),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 400, description = "Payment is not pending", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn validate_payment(
    Path(payment_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AllocationResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let today = Utc::now().date_naive();

    match validate_and_allocate(&state.db, payment_id, today).await {
        Ok(outcome) => {
            info!(
                "Payment {} validated; credit issued: {}",
                payment_id, outcome.credit_issued
            );
            // A validated payment changes every derived figure
            state.cache.invalidate_all();
            let response = ApiResponse {
                data: AllocationResponse::from(outcome),
                message: "Payment validated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(ComputeError::UnknownPayment(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Payment with id {} does not exist", payment_id),
                code: "UNKNOWN_PAYMENT".to_string(),
                success: false,
            }),
        )),
        Err(ComputeError::PaymentNotPending { id, status }) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Payment {} is {}, expected Pending", id, status),
                code: "PAYMENT_NOT_PENDING".to_string(),
                success: false,
            }),
        )),
        Err(e) => {
            error!("Failed to validate payment {}: {}", payment_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "INTERNAL_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Reject a pending payment
#[utoipa::path(
    post,
    path = "/api/v1/payments/{payment_id}/reject",
    tag = "payments",
    params(
        ("payment_id" = i32, Path, description = "Payment ID"),
    ),
    responses(
        (status = 200, description = "Payment rejected", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 400, description = "Payment is not pending", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn reject_payment(
    Path(payment_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PaymentResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let existing = match payment::Entity::find_by_id(payment_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Payment with id {} does not exist", payment_id),
                    code: "UNKNOWN_PAYMENT".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup payment {}: {}", payment_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "INTERNAL_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    if existing.status != payment::PaymentStatus::Pending {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!(
                    "Payment {} is {:?}, expected Pending",
                    payment_id, existing.status
                ),
                code: "PAYMENT_NOT_PENDING".to_string(),
                success: false,
            }),
        ));
    }

    let mut active: payment::ActiveModel = existing.into();
    active.status = Set(payment::PaymentStatus::Rejected);

    match active.update(&state.db).await {
        Ok(updated) => {
            info!("Payment {} rejected", payment_id);
            let response = ApiResponse {
                data: PaymentResponse::from(updated),
                message: "Payment rejected".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to reject payment {}: {}", payment_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "INTERNAL_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
