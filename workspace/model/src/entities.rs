//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the association treasury application
//! here. The structure follows the membership-management domain: adherents
//! own their ledger records (payments, debts, dues, assistances, credits).

pub mod adherent;
pub mod assistance;
pub mod credit;
pub mod due_type;
pub mod expense;
pub mod expense_category;
pub mod initial_debt;
pub mod monthly_due;
pub mod payment;
pub mod reminder_config;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::adherent::Entity as Adherent;
    pub use super::assistance::Entity as Assistance;
    pub use super::credit::Entity as Credit;
    pub use super::due_type::Entity as DueType;
    pub use super::expense::Entity as Expense;
    pub use super::expense_category::Entity as ExpenseCategory;
    pub use super::initial_debt::Entity as InitialDebt;
    pub use super::monthly_due::Entity as MonthlyDue;
    pub use super::payment::Entity as Payment;
    pub use super::reminder_config::Entity as ReminderConfig;
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Try to apply migrations first
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        // Setup database
        let db = setup_db().await?;

        // Create adherents
        let adherent1 = adherent::ActiveModel {
            first_name: Set("Awa".to_string()),
            last_name: Set("Diallo".to_string()),
            email: Set("awa.diallo@example.org".to_string()),
            status: Set(adherent::AdherentStatus::Active),
            joined_on: Set(NaiveDate::from_ymd_opt(2022, 9, 1).unwrap()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let adherent2 = adherent::ActiveModel {
            first_name: Set("Moussa".to_string()),
            last_name: Set("Ba".to_string()),
            email: Set("moussa.ba@example.org".to_string()),
            status: Set(adherent::AdherentStatus::Inactive),
            joined_on: Set(NaiveDate::from_ymd_opt(2021, 3, 15).unwrap()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a due type and a monthly due generated from it
        let due_type = due_type::ActiveModel {
            name: Set("Cotisation standard".to_string()),
            amount: Set(Decimal::new(1000, 2)), // 10.00
            active: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let due = monthly_due::ActiveModel {
            adherent_id: Set(adherent1.id),
            due_type_id: Set(due_type.id),
            year: Set(2024),
            month: Set(6),
            expected_amount: Set(Decimal::new(1000, 2)),
            paid_amount: Set(Decimal::ZERO),
            remaining_amount: Set(Decimal::new(1000, 2)),
            status: Set(monthly_due::DueStatus::Pending),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create an initial debt and an assistance for adherent1
        let debt = initial_debt::ActiveModel {
            adherent_id: Set(adherent1.id),
            year: Set(2023),
            amount: Set(Decimal::new(10000, 2)), // 100.00
            paid_amount: Set(Decimal::new(4000, 2)),
            remaining_amount: Set(Decimal::new(6000, 2)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        assistance::ActiveModel {
            adherent_id: Set(adherent1.id),
            label: Set("Wedding support".to_string()),
            event_date: Set(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap()),
            amount: Set(Decimal::new(5000, 2)),
            paid_amount: Set(Decimal::ZERO),
            remaining_amount: Set(Decimal::new(5000, 2)),
            status: Set(assistance::AssistanceStatus::Open),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a payment and the credit issued from its surplus
        let payment = payment::ActiveModel {
            adherent_id: Set(adherent1.id),
            amount: Set(Decimal::new(4000, 2)),
            date: Set(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
            method: Set(payment::PaymentMethod::Transfer),
            reference: Set(Some("VIR-2024-0601".to_string())),
            status: Set(payment::PaymentStatus::Validated),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        credit::ActiveModel {
            adherent_id: Set(adherent1.id),
            amount: Set(Decimal::new(2000, 2)),
            used_amount: Set(Decimal::ZERO),
            remaining_amount: Set(Decimal::new(2000, 2)),
            status: Set(credit::CreditStatus::Available),
            issued_on: Set(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
            source_payment_id: Set(Some(payment.id)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create an expense with its category
        let category = expense_category::ActiveModel {
            name: Set("Venue".to_string()),
            description: Set(Some("Room rentals".to_string())),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        expense::ActiveModel {
            label: Set("June assembly room".to_string()),
            amount: Set(Decimal::new(15000, 2)),
            date: Set(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()),
            category_id: Set(category.id),
            status: Set(expense::ExpenseStatus::Validated),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Read back and verify data
        let adherents = Adherent::find().all(&db).await?;
        assert_eq!(adherents.len(), 2);
        assert!(adherents.iter().any(|a| a.email == "awa.diallo@example.org"));
        assert!(adherents.iter().any(|a| a.id == adherent2.id));

        let dues = MonthlyDue::find()
            .filter(monthly_due::Column::AdherentId.eq(adherent1.id))
            .all(&db)
            .await?;
        assert_eq!(dues.len(), 1);
        assert_eq!(dues[0].id, due.id);
        assert_eq!(dues[0].due_type_id, due_type.id);
        assert_eq!(dues[0].remaining_amount, Decimal::new(1000, 2));

        let debts = InitialDebt::find().all(&db).await?;
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].id, debt.id);
        assert_eq!(debts[0].remaining_amount, Decimal::new(6000, 2));

        let credits = Credit::find()
            .filter(credit::Column::SourcePaymentId.eq(payment.id))
            .all(&db)
            .await?;
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].status, credit::CreditStatus::Available);

        let expenses = Expense::find().all(&db).await?;
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category_id, category.id);

        // Deleting an adherent cascades to the owned ledger records
        Adherent::delete_by_id(adherent1.id).exec(&db).await?;
        assert!(InitialDebt::find().all(&db).await?.is_empty());
        assert!(MonthlyDue::find().all(&db).await?.is_empty());
        assert!(Payment::find().all(&db).await?.is_empty());

        Ok(())
    }
}
