use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDate, Utc};
use model::entities::{expense, expense_category};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for recording a validated expense
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateExpenseRequest {
    #[validate(length(min = 1))]
    pub label: String,
    /// Must be strictly positive
    pub amount: Decimal,
    /// Defaults to today when omitted
    pub date: Option<NaiveDate>,
    pub category_id: i32,
}

/// Expense response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: i32,
    pub label: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: i32,
    pub status: String,
}

impl From<expense::Model> for ExpenseResponse {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            label: model.label,
            amount: model.amount,
            date: model.date,
            category_id: model.category_id,
            status: format!("{:?}", model.status),
        }
    }
}

/// Request body for creating an expense category
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateExpenseCategoryRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

/// Expense category response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseCategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<expense_category::Model> for ExpenseCategoryResponse {
    fn from(model: expense_category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

/// Record a validated expense
#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    tag = "expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense recorded successfully", body = ApiResponse<ExpenseResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_expense(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateExpenseRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Recording expense '{}' of {}",
        request.label, request.amount
    );

    if request.amount <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Expense amount must be strictly positive".to_string(),
                code: "INVALID_AMOUNT".to_string(),
                success: false,
            }),
        ));
    }

    // Verify the category exists before inserting
    match expense_category::Entity::find_by_id(request.category_id)
        .one(&state.db)
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!(
                "Rejected expense for unknown category {}",
                request.category_id
            );
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Category with id {} does not exist", request.category_id),
                    code: "INVALID_CATEGORY_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to verify category: {}", db_error);
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

    let new_expense = expense::ActiveModel {
        label: Set(request.label.clone()),
        amount: Set(request.amount),
        date: Set(request.date.unwrap_or_else(|| Utc::now().date_naive())),
        category_id: Set(request.category_id),
        status: Set(expense::ExpenseStatus::Validated),
        ..Default::default()
    };

    match new_expense.insert(&state.db).await {
        Ok(model) => {
            info!("Expense recorded with ID: {}", model.id);
            // The bank balance figure just changed
            state.cache.invalidate_all();
            let response = ApiResponse {
                data: ExpenseResponse::from(model),
                message: "Expense recorded successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to record expense: {}", db_error);
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

/// Get all expenses
#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    tag = "expenses",
    responses(
        (status = 200, description = "Expenses retrieved successfully", body = ApiResponse<Vec<ExpenseResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expenses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ExpenseResponse>>>, StatusCode> {
    match expense::Entity::find().all(&state.db).await {
        Ok(expenses) => {
            debug!("Retrieved {} expenses", expenses.len());
            let response = ApiResponse {
                data: expenses.into_iter().map(ExpenseResponse::from).collect(),
                message: "Expenses retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve expenses: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Create an expense category
#[utoipa::path(
    post,
    path = "/api/v1/expense-categories",
    tag = "expenses",
    request_body = CreateExpenseCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<ExpenseCategoryResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_expense_category(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateExpenseCategoryRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseCategoryResponse>>), StatusCode> {
    let new_category = expense_category::ActiveModel {
        name: Set(request.name.clone()),
        description: Set(request.description.clone()),
        ..Default::default()
    };

    match new_category.insert(&state.db).await {
        Ok(model) => {
            info!("Expense category created with ID: {}", model.id);
            let response = ApiResponse {
                data: ExpenseCategoryResponse::from(model),
                message: "Category created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create expense category '{}': {}",
                request.name, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all expense categories
#[utoipa::path(
    get,
    path = "/api/v1/expense-categories",
    tag = "expenses",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<ExpenseCategoryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expense_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ExpenseCategoryResponse>>>, StatusCode> {
    match expense_category::Entity::find().all(&state.db).await {
        Ok(categories) => {
            let response = ApiResponse {
                data: categories
                    .into_iter()
                    .map(ExpenseCategoryResponse::from)
                    .collect(),
                message: "Categories retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve expense categories: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
