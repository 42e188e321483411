pub mod allocation;
pub mod dues;
pub mod error;
pub mod synthese;

#[cfg(test)]
pub mod testing;

use chrono::{NaiveDate, Utc};
use common::FinancialSynthesis;
use sea_orm::DatabaseConnection;

use crate::error::Result;

/// Builds the synthesis report anchored at the given date, or at today's
/// date when none is provided. This is the entry point the API handlers
/// call; tests pass a fixed date to pin the "current month" figures.
pub async fn default_synthesis(
    db: &DatabaseConnection,
    today: Option<NaiveDate>,
) -> Result<FinancialSynthesis> {
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    synthese::build_synthesis(db, today).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::helpers::{
        new_adherent_named, new_assistance, new_credit, new_expense, new_monthly_due,
        new_partially_paid_debt, new_payment, setup_db,
    };
    use model::entities::payment::PaymentStatus;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// The reference scenario: an adherent with an initial debt of 100
    /// (40 already paid), one available credit of 20 and 40 in validated
    /// payments ends up exactly settled.
    #[tokio::test]
    async fn test_synthesis_reference_scenario() {
        let db = setup_db().await.expect("db setup failed");
        let adherent = new_adherent_named(&db, "Awa", "Diallo").await.expect("adherent");
        new_partially_paid_debt(&db, &adherent, 2023, 100_00, 40_00)
            .await
            .expect("debt");
        new_credit(&db, &adherent, 20_00).await.expect("credit");
        new_payment(&db, &adherent, 40_00, PaymentStatus::Validated)
            .await
            .expect("payment");

        let report = default_synthesis(&db, Some(today())).await.expect("synthesis");

        assert_eq!(report.adherent_count(), 1);
        let breakdown = &report.adherents[0];
        assert_eq!(breakdown.total_debt, Decimal::new(60_00, 2));
        assert_eq!(breakdown.net_debt, Decimal::new(40_00, 2));
        assert_eq!(breakdown.balance, Decimal::ZERO);
        assert_eq!(breakdown.total_paid, Decimal::new(40_00, 2));
    }

    /// Empty membership still produces a report, with every figure at zero.
    #[tokio::test]
    async fn test_synthesis_empty_membership() {
        let db = setup_db().await.expect("db setup failed");

        let report = default_synthesis(&db, Some(today())).await.expect("synthesis");

        assert_eq!(report.stats.adherent_count, 0);
        assert_eq!(report.stats.total_receipts, Decimal::ZERO);
        assert_eq!(report.stats.total_receivables, Decimal::ZERO);
        assert_eq!(report.stats.estimated_bank_balance, Decimal::ZERO);
        assert!(report.adherents.is_empty());
        assert!(report.payments.is_empty());
        assert!(report.expenses.is_empty());
    }

    /// Two invocations with no intervening writes differ only in the
    /// generation timestamp.
    #[tokio::test]
    async fn test_synthesis_is_idempotent() {
        let db = setup_db().await.expect("db setup failed");
        let adherent = new_adherent_named(&db, "Moussa", "Ba").await.expect("adherent");
        new_monthly_due(&db, &adherent, 2024, 6, 10_00).await.expect("due");
        new_payment(&db, &adherent, 5_00, PaymentStatus::Validated)
            .await
            .expect("payment");

        let first = default_synthesis(&db, Some(today())).await.expect("first run");
        let second = default_synthesis(&db, Some(today())).await.expect("second run");

        assert_eq!(first.stats, second.stats);
        assert_eq!(first.adherents, second.adherents);
        assert_eq!(first.payments, second.payments);
        assert_eq!(first.expenses, second.expenses);
    }

    /// Pending payments are invisible to the report; only validated money
    /// counts as receipts.
    #[tokio::test]
    async fn test_synthesis_ignores_pending_payments() {
        let db = setup_db().await.expect("db setup failed");
        let adherent = new_adherent_named(&db, "Fatou", "Sow").await.expect("adherent");
        new_payment(&db, &adherent, 100_00, PaymentStatus::Pending)
            .await
            .expect("pending payment");
        new_payment(&db, &adherent, 30_00, PaymentStatus::Validated)
            .await
            .expect("validated payment");

        let report = default_synthesis(&db, Some(today())).await.expect("synthesis");

        assert_eq!(report.stats.total_receipts, Decimal::new(30_00, 2));
        assert_eq!(report.stats.payment_count, 1);
        assert_eq!(report.adherents[0].total_paid, Decimal::new(30_00, 2));
    }

    /// Breakdowns are sorted by last name then first name, and the
    /// flattened rows resolve adherent and category names.
    #[tokio::test]
    async fn test_synthesis_ordering_and_row_resolution() {
        let db = setup_db().await.expect("db setup failed");
        let zoe = new_adherent_named(&db, "Zoe", "Traore").await.expect("adherent");
        let awa = new_adherent_named(&db, "Awa", "Diallo").await.expect("adherent");
        new_payment(&db, &zoe, 10_00, PaymentStatus::Validated)
            .await
            .expect("payment");
        new_expense(&db, "Assembly room", 50_00).await.expect("expense");

        let report = default_synthesis(&db, Some(today())).await.expect("synthesis");

        assert_eq!(report.adherents[0].adherent_id, awa.id);
        assert_eq!(report.adherents[1].adherent_id, zoe.id);

        assert_eq!(report.payments.len(), 1);
        assert_eq!(report.payments[0].adherent_name, "Zoe Traore");
        assert_eq!(report.expenses.len(), 1);
        assert_eq!(report.expenses[0].label, "Assembly room");
        assert!(report.expenses[0].category.starts_with("Category"));
    }

    /// The estimated bank balance nets validated receipts against
    /// validated expenses and ignores receivables entirely.
    #[tokio::test]
    async fn test_synthesis_bank_balance() {
        let db = setup_db().await.expect("db setup failed");
        let adherent = new_adherent_named(&db, "Omar", "Ndiaye").await.expect("adherent");
        new_payment(&db, &adherent, 200_00, PaymentStatus::Validated)
            .await
            .expect("payment");
        new_expense(&db, "Supplies", 75_50).await.expect("expense");
        new_partially_paid_debt(&db, &adherent, 2023, 500_00, 0)
            .await
            .expect("debt");
        new_assistance(&db, &adherent, today(), 80_00)
            .await
            .expect("assistance");

        let report = default_synthesis(&db, Some(today())).await.expect("synthesis");

        assert_eq!(
            report.stats.estimated_bank_balance,
            Decimal::new(124_50, 2)
        );
        // Receivables carry the debts and assistance, not the bank figure
        assert_eq!(report.stats.total_receivables, Decimal::new(580_00, 2));
    }
}
