use std::sync::atomic::AtomicU64;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Set};

use migration::{Migrator, MigratorTrait};
use model::entities::{
    adherent, assistance, credit, due_type, expense, expense_category, initial_debt, monthly_due,
    payment,
};

pub type Result<T> = std::result::Result<T, DbErr>;

pub async fn setup_db() -> Result<DatabaseConnection> {
    // Connect to the SQLite database
    let db = Database::connect("sqlite::memory:").await?;

    // Enable foreign keys
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

    // Try to apply migrations first
    Migrator::up(&db, None).await.expect("Migrations failed.");
    Ok(db)
}

pub async fn new_adherent(db: &DatabaseConnection) -> Result<adherent::Model> {
    static ADHERENT_ID: AtomicU64 = AtomicU64::new(0);

    let current_id = ADHERENT_ID.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    new_adherent_named(
        db,
        &format!("First{}", current_id),
        &format!("Last{}", current_id),
    )
    .await
}

pub async fn new_adherent_named(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> Result<adherent::Model> {
    adherent::ActiveModel {
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        email: Set(format!(
            "{}.{}@example.org",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        )),
        status: Set(adherent::AdherentStatus::Active),
        joined_on: Set(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_initial_debt(
    db: &DatabaseConnection,
    adherent: &adherent::Model,
    year: i32,
    amount: i64,
) -> Result<initial_debt::Model> {
    new_partially_paid_debt(db, adherent, year, amount, 0).await
}

pub async fn new_partially_paid_debt(
    db: &DatabaseConnection,
    adherent: &adherent::Model,
    year: i32,
    amount: i64,
    paid: i64,
) -> Result<initial_debt::Model> {
    initial_debt::ActiveModel {
        adherent_id: Set(adherent.id),
        year: Set(year),
        amount: Set(Decimal::new(amount, 2)),
        paid_amount: Set(Decimal::new(paid, 2)),
        remaining_amount: Set(Decimal::new(amount - paid, 2)),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_due_type(db: &DatabaseConnection, amount: i64) -> Result<due_type::Model> {
    static DUE_TYPE_ID: AtomicU64 = AtomicU64::new(0);

    let current_id = DUE_TYPE_ID.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    due_type::ActiveModel {
        name: Set(format!("Cotisation {}", current_id)),
        amount: Set(Decimal::new(amount, 2)),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_monthly_due(
    db: &DatabaseConnection,
    adherent: &adherent::Model,
    year: i32,
    month: i32,
    amount: i64,
) -> Result<monthly_due::Model> {
    let due_type = new_due_type(db, amount).await?;
    monthly_due::ActiveModel {
        adherent_id: Set(adherent.id),
        due_type_id: Set(due_type.id),
        year: Set(year),
        month: Set(month),
        expected_amount: Set(Decimal::new(amount, 2)),
        paid_amount: Set(Decimal::ZERO),
        remaining_amount: Set(Decimal::new(amount, 2)),
        status: Set(monthly_due::DueStatus::Pending),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_assistance(
    db: &DatabaseConnection,
    adherent: &adherent::Model,
    event_date: NaiveDate,
    amount: i64,
) -> Result<assistance::Model> {
    assistance::ActiveModel {
        adherent_id: Set(adherent.id),
        label: Set("Assistance".to_string()),
        event_date: Set(event_date),
        amount: Set(Decimal::new(amount, 2)),
        paid_amount: Set(Decimal::ZERO),
        remaining_amount: Set(Decimal::new(amount, 2)),
        status: Set(assistance::AssistanceStatus::Open),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_credit(
    db: &DatabaseConnection,
    adherent: &adherent::Model,
    amount: i64,
) -> Result<credit::Model> {
    credit::ActiveModel {
        adherent_id: Set(adherent.id),
        amount: Set(Decimal::new(amount, 2)),
        used_amount: Set(Decimal::ZERO),
        remaining_amount: Set(Decimal::new(amount, 2)),
        status: Set(credit::CreditStatus::Available),
        issued_on: Set(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        source_payment_id: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_payment(
    db: &DatabaseConnection,
    adherent: &adherent::Model,
    amount: i64,
    status: payment::PaymentStatus,
) -> Result<payment::Model> {
    payment::ActiveModel {
        adherent_id: Set(adherent.id),
        amount: Set(Decimal::new(amount, 2)),
        date: Set(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
        method: Set(payment::PaymentMethod::Cash),
        reference: Set(None),
        status: Set(status),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_expense(
    db: &DatabaseConnection,
    label: &str,
    amount: i64,
) -> Result<expense::Model> {
    static CATEGORY_ID: AtomicU64 = AtomicU64::new(0);

    let current_id = CATEGORY_ID.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    let category = expense_category::ActiveModel {
        name: Set(format!("Category {}", current_id)),
        description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    expense::ActiveModel {
        label: Set(label.to_string()),
        amount: Set(Decimal::new(amount, 2)),
        date: Set(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()),
        category_id: Set(category.id),
        status: Set(expense::ExpenseStatus::Validated),
        ..Default::default()
    }
    .insert(db)
    .await
}
