use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::converters::round_money;

/// Financial breakdown of a single adherent, derived at report time from the
/// adherent's ledger records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdherentBreakdown {
    pub adherent_id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Sum of remaining opening-balance debts.
    pub initial_debt_remaining: Decimal,
    /// Remaining amount of the due for the current calendar month, 0 if none.
    pub current_month_due: Decimal,
    /// Sum of remaining amounts over all outstanding dues.
    pub total_monthly_dues: Decimal,
    /// Remaining assistance amounts for events in the current month.
    pub current_month_assistance: Decimal,
    /// Sum of remaining amounts over all non-cancelled assistances.
    pub total_assistances: Decimal,
    /// Sum of remaining amounts over available credits (avoirs).
    pub total_credits: Decimal,
    /// Sum of validated payment amounts.
    pub total_paid: Decimal,
    /// initial_debt_remaining + total_monthly_dues + total_assistances.
    pub total_debt: Decimal,
    /// max(0, total_debt - total_credits).
    pub net_debt: Decimal,
    /// total_paid - total_debt + total_credits. Positive means overpaid.
    pub balance: Decimal,
}

impl AdherentBreakdown {
    /// An adherent is "in credit" when the balance is strictly positive.
    pub fn is_in_credit(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    /// An adherent is a debtor when debts survive the netting of credits.
    pub fn is_debtor(&self) -> bool {
        self.net_debt > Decimal::ZERO
    }
}

/// Association-wide aggregates, summed over the entire membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GlobalStats {
    /// Sum of validated payment amounts.
    pub total_receipts: Decimal,
    /// Sum of validated expense amounts.
    pub total_expenses: Decimal,
    pub total_initial_debts: Decimal,
    pub total_monthly_dues: Decimal,
    pub total_assistances: Decimal,
    pub total_credits: Decimal,
    /// total_initial_debts + total_monthly_dues + total_assistances
    /// - total_credits. Signed: goes negative when available credits exceed
    /// what the membership owes.
    pub total_receivables: Decimal,
    /// total_receipts - total_expenses.
    pub estimated_bank_balance: Decimal,
    pub adherent_count: u64,
    /// Adherents with net_debt > 0.
    pub debtor_count: u64,
    /// Adherents with balance > 0.
    pub creditor_count: u64,
    pub payment_count: u64,
    pub expense_count: u64,
}

impl GlobalStats {
    /// Returns a copy with every monetary figure rounded to 2 decimal
    /// places, the precision of the published report.
    pub fn rounded(&self) -> Self {
        Self {
            total_receipts: round_money(self.total_receipts),
            total_expenses: round_money(self.total_expenses),
            total_initial_debts: round_money(self.total_initial_debts),
            total_monthly_dues: round_money(self.total_monthly_dues),
            total_assistances: round_money(self.total_assistances),
            total_credits: round_money(self.total_credits),
            total_receivables: round_money(self.total_receivables),
            estimated_bank_balance: round_money(self.estimated_bank_balance),
            ..self.clone()
        }
    }
}

/// A single validated payment, flattened for the report listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentRow {
    pub id: i32,
    pub adherent_id: i32,
    pub adherent_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub method: String,
    pub reference: Option<String>,
}

/// A single validated expense, flattened for the report listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExpenseRow {
    pub id: i32,
    pub label: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
}

/// The full synthesis report: global aggregates, one breakdown per
/// adherent, row-level listings, and a generation timestamp. Derived and
/// never persisted; recomputed on each request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FinancialSynthesis {
    pub stats: GlobalStats,
    pub adherents: Vec<AdherentBreakdown>,
    pub payments: Vec<PaymentRow>,
    pub expenses: Vec<ExpenseRow>,
    pub generated_at: DateTime<Utc>,
}

impl FinancialSynthesis {
    pub fn new(
        stats: GlobalStats,
        adherents: Vec<AdherentBreakdown>,
        payments: Vec<PaymentRow>,
        expenses: Vec<ExpenseRow>,
    ) -> Self {
        Self {
            stats,
            adherents,
            payments,
            expenses,
            generated_at: Utc::now(),
        }
    }

    pub fn adherent_count(&self) -> usize {
        self.adherents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(net_debt: Decimal, balance: Decimal) -> AdherentBreakdown {
        AdherentBreakdown {
            adherent_id: 1,
            first_name: "Awa".to_string(),
            last_name: "Diallo".to_string(),
            initial_debt_remaining: Decimal::ZERO,
            current_month_due: Decimal::ZERO,
            total_monthly_dues: Decimal::ZERO,
            current_month_assistance: Decimal::ZERO,
            total_assistances: Decimal::ZERO,
            total_credits: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            total_debt: Decimal::ZERO,
            net_debt,
            balance,
        }
    }

    #[test]
    fn test_in_credit_and_debtor_flags() {
        let in_credit = breakdown(Decimal::ZERO, Decimal::new(5000, 2));
        assert!(in_credit.is_in_credit());
        assert!(!in_credit.is_debtor());

        let debtor = breakdown(Decimal::new(4000, 2), Decimal::new(-4000, 2));
        assert!(debtor.is_debtor());
        assert!(!debtor.is_in_credit());

        let settled = breakdown(Decimal::ZERO, Decimal::ZERO);
        assert!(!settled.is_in_credit());
        assert!(!settled.is_debtor());
    }

    #[test]
    fn test_global_stats_rounding() {
        let stats = GlobalStats {
            total_receipts: Decimal::new(123456, 3), // 123.456
            total_expenses: Decimal::new(1005, 3),   // 1.005
            total_initial_debts: Decimal::ZERO,
            total_monthly_dues: Decimal::ZERO,
            total_assistances: Decimal::ZERO,
            total_credits: Decimal::ZERO,
            total_receivables: Decimal::ZERO,
            estimated_bank_balance: Decimal::new(122451, 3),
            adherent_count: 3,
            debtor_count: 1,
            creditor_count: 1,
            payment_count: 2,
            expense_count: 1,
        };

        let rounded = stats.rounded();
        assert_eq!(rounded.total_receipts, Decimal::new(12346, 2));
        assert_eq!(rounded.total_expenses, Decimal::new(101, 2));
        assert_eq!(rounded.estimated_bank_balance, Decimal::new(12245, 2));
        // Counts are untouched
        assert_eq!(rounded.adherent_count, 3);
    }

    #[test]
    fn test_synthesis_serializes_with_timestamp() {
        let report = FinancialSynthesis::new(
            GlobalStats {
                total_receipts: Decimal::ZERO,
                total_expenses: Decimal::ZERO,
                total_initial_debts: Decimal::ZERO,
                total_monthly_dues: Decimal::ZERO,
                total_assistances: Decimal::ZERO,
                total_credits: Decimal::ZERO,
                total_receivables: Decimal::ZERO,
                estimated_bank_balance: Decimal::ZERO,
                adherent_count: 0,
                debtor_count: 0,
                creditor_count: 0,
                payment_count: 0,
                expense_count: 0,
            },
            vec![],
            vec![],
            vec![],
        );

        let json = serde_json::to_value(&report).expect("report should serialize");
        assert!(json["generated_at"].is_string());
        assert_eq!(json["adherents"].as_array().unwrap().len(), 0);
    }
}
