//! Association-wide aggregation: sums each ledger source across the whole
//! membership, independently of the per-adherent grouping.

use common::{AdherentBreakdown, GlobalStats};
use rust_decimal::Decimal;
use tracing::instrument;

use super::sources::LedgerSources;

/// Computes the global statistics from the fetched sources and the already
/// computed per-adherent breakdowns (used only for the debtor/creditor
/// counts).
///
/// `total_receivables` is signed: when available credits exceed what the
/// membership owes, the figure goes negative and represents a net liability
/// of the association towards its members.
#[instrument(skip_all)]
pub fn global_stats(sources: &LedgerSources, breakdowns: &[AdherentBreakdown]) -> GlobalStats {
    let total_receipts: Decimal = sources.payments.iter().map(|p| p.amount).sum();
    let total_expenses: Decimal = sources.expenses.iter().map(|(e, _)| e.amount).sum();
    let total_initial_debts: Decimal = sources
        .initial_debts
        .iter()
        .map(|d| d.remaining_amount)
        .sum();
    let total_monthly_dues: Decimal = sources
        .monthly_dues
        .iter()
        .map(|d| d.remaining_amount)
        .sum();
    let total_assistances: Decimal = sources
        .assistances
        .iter()
        .map(|a| a.remaining_amount)
        .sum();
    let total_credits: Decimal = sources.credits.iter().map(|c| c.remaining_amount).sum();

    let total_receivables =
        total_initial_debts + total_monthly_dues + total_assistances - total_credits;
    let estimated_bank_balance = total_receipts - total_expenses;

    GlobalStats {
        total_receipts,
        total_expenses,
        total_initial_debts,
        total_monthly_dues,
        total_assistances,
        total_credits,
        total_receivables,
        estimated_bank_balance,
        adherent_count: sources.adherents.len() as u64,
        debtor_count: breakdowns.iter().filter(|b| b.is_debtor()).count() as u64,
        creditor_count: breakdowns.iter().filter(|b| b.is_in_credit()).count() as u64,
        payment_count: sources.payments.len() as u64,
        expense_count: sources.expenses.len() as u64,
    }
}
