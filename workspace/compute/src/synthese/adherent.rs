//! Per-adherent aggregation: sums the remaining balances of every ledger
//! source owned by one adherent and derives the net figures.
//!
//! Pure computation over preloaded, pre-filtered collections; the caller is
//! responsible for handing in only validated payments, outstanding dues,
//! non-cancelled assistances and available credits.

use chrono::{Datelike, NaiveDate};
use common::AdherentBreakdown;
use model::entities::{adherent, assistance, credit, initial_debt, monthly_due, payment};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::dues::is_current_period;

/// Computes the financial breakdown of a single adherent.
///
/// `today` anchors the "current month" figures; all other sums span the
/// adherent's whole ledger.
#[instrument(skip_all, fields(adherent_id = adherent.id))]
pub fn breakdown_for_adherent(
    adherent: &adherent::Model,
    debts: &[&initial_debt::Model],
    dues: &[&monthly_due::Model],
    assistances: &[&assistance::Model],
    credits: &[&credit::Model],
    payments: &[&payment::Model],
    today: NaiveDate,
) -> AdherentBreakdown {
    let initial_debt_remaining: Decimal = debts.iter().map(|d| d.remaining_amount).sum();

    let current_month_due: Decimal = dues
        .iter()
        .filter(|d| is_current_period(d.year, d.month, today))
        .map(|d| d.remaining_amount)
        .sum();

    let total_monthly_dues: Decimal = dues.iter().map(|d| d.remaining_amount).sum();

    let current_month_assistance: Decimal = assistances
        .iter()
        .filter(|a| {
            a.event_date.year() == today.year() && a.event_date.month() == today.month()
        })
        .map(|a| a.remaining_amount)
        .sum();

    let total_assistances: Decimal = assistances.iter().map(|a| a.remaining_amount).sum();

    let total_credits: Decimal = credits.iter().map(|c| c.remaining_amount).sum();

    let total_paid: Decimal = payments.iter().map(|p| p.amount).sum();

    let total_debt = initial_debt_remaining + total_monthly_dues + total_assistances;
    let net_debt = (total_debt - total_credits).max(Decimal::ZERO);
    let balance = total_paid - total_debt + total_credits;

    AdherentBreakdown {
        adherent_id: adherent.id,
        first_name: adherent.first_name.clone(),
        last_name: adherent.last_name.clone(),
        initial_debt_remaining,
        current_month_due,
        total_monthly_dues,
        current_month_assistance,
        total_assistances,
        total_credits,
        total_paid,
        total_debt,
        net_debt,
        balance,
    }
}
