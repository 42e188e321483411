//! Payment validation and allocation.
//!
//! Validating a payment applies its amount to the adherent's outstanding
//! items oldest-first: initial debts (by year), then monthly dues (by
//! period), then assistances (by event date). Whatever is left after every
//! item is settled becomes a new available credit (avoir). The whole
//! operation runs inside one database transaction.

use chrono::NaiveDate;
use model::entities::{assistance, credit, initial_debt, monthly_due, payment};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::dues::status_for;
use crate::error::{ComputeError, Result};

/// What a validation run did with the payment's amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    pub payment_id: i32,
    pub adherent_id: i32,
    pub applied_to_initial_debts: Decimal,
    pub applied_to_monthly_dues: Decimal,
    pub applied_to_assistances: Decimal,
    /// Surplus turned into a new credit; zero when the payment was fully
    /// consumed by outstanding items.
    pub credit_issued: Decimal,
}

/// Validates a pending payment and allocates its amount.
///
/// Fails without side effects when the payment does not exist or is not
/// Pending; any database error rolls the transaction back.
#[instrument(skip(db))]
pub async fn validate_and_allocate(
    db: &DatabaseConnection,
    payment_id: i32,
    today: NaiveDate,
) -> Result<AllocationOutcome> {
    let txn = db.begin().await?;

    let payment_model = payment::Entity::find_by_id(payment_id)
        .one(&txn)
        .await?
        .ok_or(ComputeError::UnknownPayment(payment_id))?;

    if payment_model.status != payment::PaymentStatus::Pending {
        return Err(ComputeError::PaymentNotPending {
            id: payment_id,
            status: format!("{:?}", payment_model.status),
        });
    }

    let adherent_id = payment_model.adherent_id;
    let mut left = payment_model.amount;

    let mut payment_active: payment::ActiveModel = payment_model.into();
    payment_active.status = Set(payment::PaymentStatus::Validated);
    payment_active.update(&txn).await?;

    let applied_to_initial_debts = allocate_to_debts(&txn, adherent_id, &mut left).await?;
    let applied_to_monthly_dues = allocate_to_dues(&txn, adherent_id, &mut left, today).await?;
    let applied_to_assistances = allocate_to_assistances(&txn, adherent_id, &mut left).await?;

    let credit_issued = if left > Decimal::ZERO {
        credit::ActiveModel {
            adherent_id: Set(adherent_id),
            amount: Set(left),
            used_amount: Set(Decimal::ZERO),
            remaining_amount: Set(left),
            status: Set(credit::CreditStatus::Available),
            issued_on: Set(today),
            source_payment_id: Set(Some(payment_id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        info!(
            "Payment {} overpaid by {}; issued a credit for adherent {}",
            payment_id, left, adherent_id
        );
        left
    } else {
        Decimal::ZERO
    };

    txn.commit().await?;

    let outcome = AllocationOutcome {
        payment_id,
        adherent_id,
        applied_to_initial_debts,
        applied_to_monthly_dues,
        applied_to_assistances,
        credit_issued,
    };
    debug!("Allocation outcome: {:?}", outcome);
    Ok(outcome)
}

/// Applies `left` to the adherent's initial debts, oldest year first.
async fn allocate_to_debts<C: ConnectionTrait>(
    db: &C,
    adherent_id: i32,
    left: &mut Decimal,
) -> Result<Decimal> {
    let mut applied = Decimal::ZERO;
    if *left <= Decimal::ZERO {
        return Ok(applied);
    }

    let debts = initial_debt::Entity::find()
        .filter(initial_debt::Column::AdherentId.eq(adherent_id))
        .filter(initial_debt::Column::RemainingAmount.gt(Decimal::ZERO))
        .order_by_asc(initial_debt::Column::Year)
        .all(db)
        .await?;

    for debt in debts {
        if *left <= Decimal::ZERO {
            break;
        }
        let take = debt.remaining_amount.min(*left);
        let mut active: initial_debt::ActiveModel = debt.clone().into();
        active.paid_amount = Set(debt.paid_amount + take);
        active.remaining_amount = Set(debt.remaining_amount - take);
        active.update(db).await?;

        *left -= take;
        applied += take;
    }

    Ok(applied)
}

/// Applies `left` to outstanding monthly dues, oldest period first, and
/// rederives each due's status.
async fn allocate_to_dues<C: ConnectionTrait>(
    db: &C,
    adherent_id: i32,
    left: &mut Decimal,
    today: NaiveDate,
) -> Result<Decimal> {
    let mut applied = Decimal::ZERO;
    if *left <= Decimal::ZERO {
        return Ok(applied);
    }

    let dues = monthly_due::Entity::find()
        .filter(monthly_due::Column::AdherentId.eq(adherent_id))
        .filter(monthly_due::Column::RemainingAmount.gt(Decimal::ZERO))
        .order_by_asc(monthly_due::Column::Year)
        .order_by_asc(monthly_due::Column::Month)
        .all(db)
        .await?;

    for due in dues {
        if *left <= Decimal::ZERO {
            break;
        }
        let take = due.remaining_amount.min(*left);
        let paid = due.paid_amount + take;
        let mut active: monthly_due::ActiveModel = due.clone().into();
        active.paid_amount = Set(paid);
        active.remaining_amount = Set(due.remaining_amount - take);
        active.status = Set(status_for(
            due.expected_amount,
            paid,
            due.year,
            due.month,
            today,
        ));
        active.update(db).await?;

        *left -= take;
        applied += take;
    }

    Ok(applied)
}

/// Applies `left` to open assistances, earliest event first; a fully paid
/// assistance moves to Settled.
async fn allocate_to_assistances<C: ConnectionTrait>(
    db: &C,
    adherent_id: i32,
    left: &mut Decimal,
) -> Result<Decimal> {
    let mut applied = Decimal::ZERO;
    if *left <= Decimal::ZERO {
        return Ok(applied);
    }

    let assistances = assistance::Entity::find()
        .filter(assistance::Column::AdherentId.eq(adherent_id))
        .filter(assistance::Column::Status.eq(assistance::AssistanceStatus::Open))
        .filter(assistance::Column::RemainingAmount.gt(Decimal::ZERO))
        .order_by_asc(assistance::Column::EventDate)
        .all(db)
        .await?;

    for item in assistances {
        if *left <= Decimal::ZERO {
            break;
        }
        let take = item.remaining_amount.min(*left);
        let remaining = item.remaining_amount - take;
        let mut active: assistance::ActiveModel = item.clone().into();
        active.paid_amount = Set(item.paid_amount + take);
        active.remaining_amount = Set(remaining);
        if remaining == Decimal::ZERO {
            active.status = Set(assistance::AssistanceStatus::Settled);
        }
        active.update(db).await?;

        *left -= take;
        applied += take;
    }

    Ok(applied)
}
