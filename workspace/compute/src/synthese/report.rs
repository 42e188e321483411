//! Report assembly: joins the fan-out fetch, the per-adherent aggregation
//! and the global statistics into the response payload.

use std::collections::HashMap;

use chrono::NaiveDate;
use common::{full_name, AdherentBreakdown, ExpenseRow, FinancialSynthesis, PaymentRow};
use sea_orm::DatabaseConnection;
use tracing::{debug, instrument};

use super::adherent::breakdown_for_adherent;
use super::global::global_stats;
use super::sources::{fetch_ledger_sources, LedgerSources};
use crate::error::Result;

/// Builds the full synthesis report over the current dataset.
///
/// Read-only: two invocations with no intervening writes produce the same
/// report apart from `generated_at`.
#[instrument(skip(db))]
pub async fn build_synthesis(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<FinancialSynthesis> {
    let sources = fetch_ledger_sources(db).await?;
    Ok(assemble(&sources, today))
}

/// Assembles the report from already fetched sources. Split out of
/// [`build_synthesis`] so the aggregation can be exercised without a
/// database.
pub fn assemble(sources: &LedgerSources, today: NaiveDate) -> FinancialSynthesis {
    let debts_by_adherent = group_by(&sources.initial_debts, |d| d.adherent_id);
    let dues_by_adherent = group_by(&sources.monthly_dues, |d| d.adherent_id);
    let assistances_by_adherent = group_by(&sources.assistances, |a| a.adherent_id);
    let credits_by_adherent = group_by(&sources.credits, |c| c.adherent_id);
    let payments_by_adherent = group_by(&sources.payments, |p| p.adherent_id);

    // Adherents arrive sorted by (last name, first name) from the query,
    // which fixes the breakdown order.
    let breakdowns: Vec<AdherentBreakdown> = sources
        .adherents
        .iter()
        .map(|adherent| {
            breakdown_for_adherent(
                adherent,
                debts_by_adherent
                    .get(&adherent.id)
                    .map_or(&[][..], |v| v.as_slice()),
                dues_by_adherent
                    .get(&adherent.id)
                    .map_or(&[][..], |v| v.as_slice()),
                assistances_by_adherent
                    .get(&adherent.id)
                    .map_or(&[][..], |v| v.as_slice()),
                credits_by_adherent
                    .get(&adherent.id)
                    .map_or(&[][..], |v| v.as_slice()),
                payments_by_adherent
                    .get(&adherent.id)
                    .map_or(&[][..], |v| v.as_slice()),
                today,
            )
        })
        .collect();

    let stats = global_stats(sources, &breakdowns).rounded();

    let names: HashMap<i32, String> = sources
        .adherents
        .iter()
        .map(|a| (a.id, full_name(&a.first_name, &a.last_name)))
        .collect();

    let payments = sources
        .payments
        .iter()
        .map(|p| PaymentRow {
            id: p.id,
            adherent_id: p.adherent_id,
            adherent_name: names.get(&p.adherent_id).cloned().unwrap_or_default(),
            amount: p.amount,
            date: p.date,
            method: format!("{:?}", p.method),
            reference: p.reference.clone(),
        })
        .collect();

    let expenses = sources
        .expenses
        .iter()
        .map(|(e, category)| ExpenseRow {
            id: e.id,
            label: e.label.clone(),
            amount: e.amount,
            date: e.date,
            category: category.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
        })
        .collect();

    debug!(
        "Assembled synthesis: {} adherents, {} debtors",
        breakdowns.len(),
        stats.debtor_count
    );

    FinancialSynthesis::new(stats, breakdowns, payments, expenses)
}

/// Groups borrowed items by an integer key, preserving input order within
/// each group.
fn group_by<T, F: Fn(&T) -> i32>(items: &[T], key: F) -> HashMap<i32, Vec<&T>> {
    let mut map: HashMap<i32, Vec<&T>> = HashMap::new();
    for item in items {
        map.entry(key(item)).or_default().push(item);
    }
    map
}
