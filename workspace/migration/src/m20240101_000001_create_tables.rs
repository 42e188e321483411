use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create adherents table
        manager
            .create_table(
                Table::create()
                    .table(Adherents::Table)
                    .if_not_exists()
                    .col(pk_auto(Adherents::Id))
                    .col(string(Adherents::FirstName))
                    .col(string(Adherents::LastName))
                    .col(string(Adherents::Email).unique_key())
                    .col(string(Adherents::Status).string_len(10))
                    .col(date(Adherents::JoinedOn))
                    .to_owned(),
            )
            .await?;

        // Create payments table
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk_auto(Payments::Id))
                    .col(integer(Payments::AdherentId))
                    .col(decimal(Payments::Amount).decimal_len(16, 4))
                    .col(date(Payments::Date))
                    .col(string(Payments::Method).string_len(10))
                    .col(string_null(Payments::Reference))
                    .col(string(Payments::Status).string_len(10))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_adherent")
                            .from(Payments::Table, Payments::AdherentId)
                            .to(Adherents::Table, Adherents::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create expense_categories table
        manager
            .create_table(
                Table::create()
                    .table(ExpenseCategories::Table)
                    .if_not_exists()
                    .col(pk_auto(ExpenseCategories::Id))
                    .col(string(ExpenseCategories::Name).unique_key())
                    .col(string_null(ExpenseCategories::Description))
                    .to_owned(),
            )
            .await?;

        // Create expenses table
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Expenses::Id))
                    .col(string(Expenses::Label))
                    .col(decimal(Expenses::Amount).decimal_len(16, 4))
                    .col(date(Expenses::Date))
                    .col(integer(Expenses::CategoryId))
                    .col(string(Expenses::Status).string_len(10))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_category")
                            .from(Expenses::Table, Expenses::CategoryId)
                            .to(ExpenseCategories::Table, ExpenseCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create initial_debts table
        manager
            .create_table(
                Table::create()
                    .table(InitialDebts::Table)
                    .if_not_exists()
                    .col(pk_auto(InitialDebts::Id))
                    .col(integer(InitialDebts::AdherentId))
                    .col(integer(InitialDebts::Year))
                    .col(decimal(InitialDebts::Amount).decimal_len(16, 4))
                    .col(decimal(InitialDebts::PaidAmount).decimal_len(16, 4))
                    .col(decimal(InitialDebts::RemainingAmount).decimal_len(16, 4))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_initial_debt_adherent")
                            .from(InitialDebts::Table, InitialDebts::AdherentId)
                            .to(Adherents::Table, Adherents::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create due_types table
        manager
            .create_table(
                Table::create()
                    .table(DueTypes::Table)
                    .if_not_exists()
                    .col(pk_auto(DueTypes::Id))
                    .col(string(DueTypes::Name).unique_key())
                    .col(decimal(DueTypes::Amount).decimal_len(16, 4))
                    .col(boolean(DueTypes::Active).default(true))
                    .to_owned(),
            )
            .await?;

        // Create monthly_dues table
        manager
            .create_table(
                Table::create()
                    .table(MonthlyDues::Table)
                    .if_not_exists()
                    .col(pk_auto(MonthlyDues::Id))
                    .col(integer(MonthlyDues::AdherentId))
                    .col(integer(MonthlyDues::DueTypeId))
                    .col(integer(MonthlyDues::Year))
                    .col(integer(MonthlyDues::Month))
                    .col(decimal(MonthlyDues::ExpectedAmount).decimal_len(16, 4))
                    .col(decimal(MonthlyDues::PaidAmount).decimal_len(16, 4))
                    .col(decimal(MonthlyDues::RemainingAmount).decimal_len(16, 4))
                    .col(string(MonthlyDues::Status).string_len(15))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_monthly_due_adherent")
                            .from(MonthlyDues::Table, MonthlyDues::AdherentId)
                            .to(Adherents::Table, Adherents::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_monthly_due_due_type")
                            .from(MonthlyDues::Table, MonthlyDues::DueTypeId)
                            .to(DueTypes::Table, DueTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_monthly_due_period")
                            .col(MonthlyDues::AdherentId)
                            .col(MonthlyDues::DueTypeId)
                            .col(MonthlyDues::Year)
                            .col(MonthlyDues::Month)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create assistances table
        manager
            .create_table(
                Table::create()
                    .table(Assistances::Table)
                    .if_not_exists()
                    .col(pk_auto(Assistances::Id))
                    .col(integer(Assistances::AdherentId))
                    .col(string(Assistances::Label))
                    .col(date(Assistances::EventDate))
                    .col(decimal(Assistances::Amount).decimal_len(16, 4))
                    .col(decimal(Assistances::PaidAmount).decimal_len(16, 4))
                    .col(decimal(Assistances::RemainingAmount).decimal_len(16, 4))
                    .col(string(Assistances::Status).string_len(10))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assistance_adherent")
                            .from(Assistances::Table, Assistances::AdherentId)
                            .to(Adherents::Table, Adherents::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create credits table
        manager
            .create_table(
                Table::create()
                    .table(Credits::Table)
                    .if_not_exists()
                    .col(pk_auto(Credits::Id))
                    .col(integer(Credits::AdherentId))
                    .col(decimal(Credits::Amount).decimal_len(16, 4))
                    .col(decimal(Credits::UsedAmount).decimal_len(16, 4))
                    .col(decimal(Credits::RemainingAmount).decimal_len(16, 4))
                    .col(string(Credits::Status).string_len(10))
                    .col(date(Credits::IssuedOn))
                    .col(integer_null(Credits::SourcePaymentId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_adherent")
                            .from(Credits::Table, Credits::AdherentId)
                            .to(Adherents::Table, Adherents::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_source_payment")
                            .from(Credits::Table, Credits::SourcePaymentId)
                            .to(Payments::Table, Payments::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Credits::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Assistances::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MonthlyDues::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DueTypes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(InitialDebts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ExpenseCategories::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Adherents::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Adherents {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Status,
    JoinedOn,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    AdherentId,
    Amount,
    Date,
    Method,
    Reference,
    Status,
}

#[derive(DeriveIden)]
enum ExpenseCategories {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    Label,
    Amount,
    Date,
    CategoryId,
    Status,
}

#[derive(DeriveIden)]
enum InitialDebts {
    Table,
    Id,
    AdherentId,
    Year,
    Amount,
    PaidAmount,
    RemainingAmount,
}

#[derive(DeriveIden)]
enum DueTypes {
    Table,
    Id,
    Name,
    Amount,
    Active,
}

#[derive(DeriveIden)]
enum MonthlyDues {
    Table,
    Id,
    AdherentId,
    DueTypeId,
    Year,
    Month,
    ExpectedAmount,
    PaidAmount,
    RemainingAmount,
    Status,
}

#[derive(DeriveIden)]
enum Assistances {
    Table,
    Id,
    AdherentId,
    Label,
    EventDate,
    Amount,
    PaidAmount,
    RemainingAmount,
    Status,
}

#[derive(DeriveIden)]
enum Credits {
    Table,
    Id,
    AdherentId,
    Amount,
    UsedAmount,
    RemainingAmount,
    Status,
    IssuedOn,
    SourcePaymentId,
}
