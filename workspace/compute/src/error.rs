use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A referenced payment does not exist
    #[error("Payment {0} does not exist")]
    UnknownPayment(i32),

    /// A payment is in the wrong status for the requested operation
    #[error("Payment {id} is {status}, expected Pending")]
    PaymentNotPending { id: i32, status: String },
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
