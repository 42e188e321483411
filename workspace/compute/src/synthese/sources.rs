//! Read side of the synthesis report: one independent query per ledger
//! source. The queries have no ordering dependency among them, so
//! [`fetch_ledger_sources`] issues them concurrently and joins the results.

use model::entities::{
    adherent, assistance, credit, expense, expense_category, initial_debt, monthly_due, payment,
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument, trace};

use crate::error::Result;

/// Everything the report assembler needs, fetched in one fan-out pass.
#[derive(Debug, Clone)]
pub struct LedgerSources {
    /// All adherents, sorted by (last name, first name).
    pub adherents: Vec<adherent::Model>,
    /// Validated payments only.
    pub payments: Vec<payment::Model>,
    /// Validated expenses with their category resolved.
    pub expenses: Vec<(expense::Model, Option<expense_category::Model>)>,
    pub initial_debts: Vec<initial_debt::Model>,
    /// Dues still outstanding (Pending, PartiallyPaid or Late).
    pub monthly_dues: Vec<monthly_due::Model>,
    /// Assistances that were not cancelled.
    pub assistances: Vec<assistance::Model>,
    /// Available credits with a positive remaining amount.
    pub credits: Vec<credit::Model>,
}

#[instrument(skip(db))]
pub async fn get_adherents(db: &DatabaseConnection) -> Result<Vec<adherent::Model>> {
    let adherents = adherent::Entity::find()
        .order_by_asc(adherent::Column::LastName)
        .order_by_asc(adherent::Column::FirstName)
        .all(db)
        .await?;

    trace!("Fetched {} adherents", adherents.len());
    Ok(adherents)
}

#[instrument(skip(db))]
pub async fn get_validated_payments(db: &DatabaseConnection) -> Result<Vec<payment::Model>> {
    let payments = payment::Entity::find()
        .filter(payment::Column::Status.eq(payment::PaymentStatus::Validated))
        .order_by_asc(payment::Column::Date)
        .all(db)
        .await?;

    trace!("Fetched {} validated payments", payments.len());
    Ok(payments)
}

#[instrument(skip(db))]
pub async fn get_validated_expenses(
    db: &DatabaseConnection,
) -> Result<Vec<(expense::Model, Option<expense_category::Model>)>> {
    let expenses = expense::Entity::find()
        .filter(expense::Column::Status.eq(expense::ExpenseStatus::Validated))
        .order_by_asc(expense::Column::Date)
        .find_also_related(expense_category::Entity)
        .all(db)
        .await?;

    trace!("Fetched {} validated expenses", expenses.len());
    Ok(expenses)
}

#[instrument(skip(db))]
pub async fn get_initial_debts(db: &DatabaseConnection) -> Result<Vec<initial_debt::Model>> {
    let debts = initial_debt::Entity::find().all(db).await?;

    trace!("Fetched {} initial debts", debts.len());
    Ok(debts)
}

#[instrument(skip(db))]
pub async fn get_outstanding_dues(db: &DatabaseConnection) -> Result<Vec<monthly_due::Model>> {
    let dues = monthly_due::Entity::find()
        .filter(monthly_due::Column::Status.is_in([
            monthly_due::DueStatus::Pending,
            monthly_due::DueStatus::PartiallyPaid,
            monthly_due::DueStatus::Late,
        ]))
        .all(db)
        .await?;

    trace!("Fetched {} outstanding dues", dues.len());
    Ok(dues)
}

#[instrument(skip(db))]
pub async fn get_open_assistances(db: &DatabaseConnection) -> Result<Vec<assistance::Model>> {
    let assistances = assistance::Entity::find()
        .filter(assistance::Column::Status.ne(assistance::AssistanceStatus::Cancelled))
        .all(db)
        .await?;

    trace!("Fetched {} non-cancelled assistances", assistances.len());
    Ok(assistances)
}

#[instrument(skip(db))]
pub async fn get_available_credits(db: &DatabaseConnection) -> Result<Vec<credit::Model>> {
    let credits = credit::Entity::find()
        .filter(credit::Column::Status.eq(credit::CreditStatus::Available))
        .filter(credit::Column::RemainingAmount.gt(Decimal::ZERO))
        .all(db)
        .await?;

    trace!("Fetched {} available credits", credits.len());
    Ok(credits)
}

/// Fetches every ledger source concurrently. Any database error aborts the
/// whole fetch; there are no partial results.
#[instrument(skip(db))]
pub async fn fetch_ledger_sources(db: &DatabaseConnection) -> Result<LedgerSources> {
    let (adherents, payments, expenses, initial_debts, monthly_dues, assistances, credits) =
        tokio::try_join!(
            get_adherents(db),
            get_validated_payments(db),
            get_validated_expenses(db),
            get_initial_debts(db),
            get_outstanding_dues(db),
            get_open_assistances(db),
            get_available_credits(db),
        )?;

    debug!(
        "Ledger sources: {} adherents, {} payments, {} expenses, {} debts, {} dues, {} assistances, {} credits",
        adherents.len(),
        payments.len(),
        expenses.len(),
        initial_debts.len(),
        monthly_dues.len(),
        assistances.len(),
        credits.len()
    );

    Ok(LedgerSources {
        adherents,
        payments,
        expenses,
        initial_debts,
        monthly_dues,
        assistances,
        credits,
    })
}
