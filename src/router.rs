use crate::handlers::{
    adherents::{create_adherent, delete_adherent, get_adherent, get_adherents, update_adherent},
    dues::{generate_dues, get_adherent_dues},
    expenses::{create_expense, create_expense_category, get_expense_categories, get_expenses},
    health::health_check,
    payments::{create_payment, get_payment, get_payments, reject_payment, validate_payment},
    reminder_config::{get_reminder_config, update_reminder_config},
    synthese::get_synthese,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Adherent CRUD routes
        .route("/api/v1/adherents", post(create_adherent))
        .route("/api/v1/adherents", get(get_adherents))
        .route("/api/v1/adherents/:adherent_id", get(get_adherent))
        .route("/api/v1/adherents/:adherent_id", put(update_adherent))
        .route("/api/v1/adherents/:adherent_id", delete(delete_adherent))
        .route("/api/v1/adherents/:adherent_id/dues", get(get_adherent_dues))
        // Payment routes
        .route("/api/v1/payments", post(create_payment))
        .route("/api/v1/payments", get(get_payments))
        .route("/api/v1/payments/:payment_id", get(get_payment))
        .route("/api/v1/payments/:payment_id/validate", post(validate_payment))
        .route("/api/v1/payments/:payment_id/reject", post(reject_payment))
        // Expense routes
        .route("/api/v1/expenses", post(create_expense))
        .route("/api/v1/expenses", get(get_expenses))
        .route("/api/v1/expense-categories", post(create_expense_category))
        .route("/api/v1/expense-categories", get(get_expense_categories))
        // Due generation routes
        .route("/api/v1/dues/generate", post(generate_dues))
        // Synthesis report (admin-only)
        .route("/api/v1/synthese", get(get_synthese))
        // Reminder configuration
        .route("/api/v1/reminder-config", get(get_reminder_config))
        .route("/api/v1/reminder-config", put(update_reminder_config))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
