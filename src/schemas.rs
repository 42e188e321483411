use common::{AdherentBreakdown, ExpenseRow, FinancialSynthesis, GlobalStats, PaymentRow};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
    /// Token expected in the X-Admin-Token header of admin-only endpoints
    pub admin_token: String,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Synthesis(FinancialSynthesis),
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::adherents::create_adherent,
        crate::handlers::adherents::get_adherents,
        crate::handlers::adherents::get_adherent,
        crate::handlers::adherents::update_adherent,
        crate::handlers::adherents::delete_adherent,
        crate::handlers::payments::create_payment,
        crate::handlers::payments::get_payments,
        crate::handlers::payments::get_payment,
        crate::handlers::payments::validate_payment,
        crate::handlers::payments::reject_payment,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::get_expenses,
        crate::handlers::expenses::create_expense_category,
        crate::handlers::expenses::get_expense_categories,
        crate::handlers::dues::generate_dues,
        crate::handlers::dues::get_adherent_dues,
        crate::handlers::synthese::get_synthese,
        crate::handlers::reminder_config::get_reminder_config,
        crate::handlers::reminder_config::update_reminder_config,
    ),
    components(
        schemas(
            ApiResponse<FinancialSynthesis>,
            ErrorResponse,
            HealthResponse,
            FinancialSynthesis,
            GlobalStats,
            AdherentBreakdown,
            PaymentRow,
            ExpenseRow,
            crate::handlers::adherents::CreateAdherentRequest,
            crate::handlers::adherents::UpdateAdherentRequest,
            crate::handlers::adherents::AdherentResponse,
            crate::handlers::adherents::AdherentStatus,
            crate::handlers::payments::CreatePaymentRequest,
            crate::handlers::payments::PaymentResponse,
            crate::handlers::payments::PaymentMethod,
            crate::handlers::payments::AllocationResponse,
            crate::handlers::expenses::CreateExpenseRequest,
            crate::handlers::expenses::ExpenseResponse,
            crate::handlers::expenses::CreateExpenseCategoryRequest,
            crate::handlers::expenses::ExpenseCategoryResponse,
            crate::handlers::dues::GenerateDuesRequest,
            crate::handlers::dues::GenerateDuesResponse,
            crate::handlers::dues::DueResponse,
            crate::handlers::reminder_config::ReminderConfigResponse,
            crate::handlers::reminder_config::UpdateReminderConfigRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "adherents", description = "Adherent management endpoints"),
        (name = "payments", description = "Payment recording and validation endpoints"),
        (name = "expenses", description = "Expense and category endpoints"),
        (name = "dues", description = "Monthly due generation endpoints"),
        (name = "synthese", description = "Financial synthesis report endpoints"),
        (name = "config", description = "Reminder configuration endpoints"),
    ),
    info(
        title = "Assorust API",
        description = "Association Treasury API - adherents, dues, payments and financial synthesis",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
