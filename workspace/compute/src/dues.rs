//! Monthly due (cotisation) generation and status derivation.
//!
//! Dues are generated once per (adherent, due type, year, month); the
//! status is always rederived from the paid/expected amounts and the
//! period, never edited directly.

use chrono::{Datelike, NaiveDate};
use model::entities::{adherent, due_type, monthly_due};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use tracing::{debug, instrument};

use crate::error::Result;

/// Outcome of a bulk due-generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub created_count: u64,
    pub skipped_count: u64,
}

/// Derives the status of a monthly due from its amounts and period.
///
/// `paid >= expected` => Paid; `0 < paid < expected` => PartiallyPaid;
/// unpaid => Pending while (year, month) is the current or a future
/// period, Late once the period's month has passed.
pub fn status_for(
    expected: Decimal,
    paid: Decimal,
    year: i32,
    month: i32,
    today: NaiveDate,
) -> monthly_due::DueStatus {
    if paid >= expected {
        return monthly_due::DueStatus::Paid;
    }
    if paid > Decimal::ZERO {
        return monthly_due::DueStatus::PartiallyPaid;
    }
    if (year, month) < (today.year(), today.month() as i32) {
        monthly_due::DueStatus::Late
    } else {
        monthly_due::DueStatus::Pending
    }
}

/// Returns true when the due period matches today's calendar month.
pub fn is_current_period(year: i32, month: i32, today: NaiveDate) -> bool {
    year == today.year() && month == today.month() as i32
}

/// Generates the month's dues for every active adherent from every active
/// due type. Pairs that already have a due for the period are skipped, so
/// the operation can be re-run safely.
#[instrument(skip(db))]
pub async fn generate_for_month<C: ConnectionTrait>(
    db: &C,
    year: i32,
    month: i32,
    today: NaiveDate,
) -> Result<GenerationSummary> {
    let adherents = adherent::Entity::find()
        .filter(adherent::Column::Status.eq(adherent::AdherentStatus::Active))
        .all(db)
        .await?;

    let due_types = due_type::Entity::find()
        .filter(due_type::Column::Active.eq(true))
        .all(db)
        .await?;

    let existing = monthly_due::Entity::find()
        .filter(monthly_due::Column::Year.eq(year))
        .filter(monthly_due::Column::Month.eq(month))
        .all(db)
        .await?;

    let existing_pairs: std::collections::HashSet<(i32, i32)> = existing
        .iter()
        .map(|d| (d.adherent_id, d.due_type_id))
        .collect();

    let mut created = 0u64;
    let mut skipped = 0u64;

    for adherent in &adherents {
        for due_type in &due_types {
            if existing_pairs.contains(&(adherent.id, due_type.id)) {
                skipped += 1;
                continue;
            }

            monthly_due::ActiveModel {
                adherent_id: Set(adherent.id),
                due_type_id: Set(due_type.id),
                year: Set(year),
                month: Set(month),
                expected_amount: Set(due_type.amount),
                paid_amount: Set(Decimal::ZERO),
                remaining_amount: Set(due_type.amount),
                status: Set(status_for(
                    due_type.amount,
                    Decimal::ZERO,
                    year,
                    month,
                    today,
                )),
                ..Default::default()
            }
            .insert(db)
            .await?;
            created += 1;
        }
    }

    debug!(
        "Generated {} dues for {}-{:02} ({} already present)",
        created, year, month, skipped
    );

    Ok(GenerationSummary {
        created_count: created,
        skipped_count: skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::entities::monthly_due::DueStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_status_paid_when_fully_covered() {
        let status = status_for(Decimal::new(1000, 2), Decimal::new(1000, 2), 2024, 6, today());
        assert_eq!(status, DueStatus::Paid);

        // Overpayment still reads as Paid
        let status = status_for(Decimal::new(1000, 2), Decimal::new(1500, 2), 2024, 3, today());
        assert_eq!(status, DueStatus::Paid);
    }

    #[test]
    fn test_status_partially_paid() {
        let status = status_for(Decimal::new(1000, 2), Decimal::new(400, 2), 2024, 2, today());
        assert_eq!(status, DueStatus::PartiallyPaid);
    }

    #[test]
    fn test_status_pending_for_current_month() {
        let status = status_for(Decimal::new(1000, 2), Decimal::ZERO, 2024, 6, today());
        assert_eq!(status, DueStatus::Pending);
    }

    #[test]
    fn test_status_pending_for_future_month() {
        let status = status_for(Decimal::new(1000, 2), Decimal::ZERO, 2024, 7, today());
        assert_eq!(status, DueStatus::Pending);
    }

    #[test]
    fn test_status_late_for_past_month() {
        let status = status_for(Decimal::new(1000, 2), Decimal::ZERO, 2024, 5, today());
        assert_eq!(status, DueStatus::Late);

        // Past year, later month number
        let status = status_for(Decimal::new(1000, 2), Decimal::ZERO, 2023, 12, today());
        assert_eq!(status, DueStatus::Late);
    }

    #[test]
    fn test_is_current_period() {
        assert!(is_current_period(2024, 6, today()));
        assert!(!is_current_period(2024, 5, today()));
        assert!(!is_current_period(2023, 6, today()));
    }
}
