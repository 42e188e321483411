use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Persisted dunning/reminder configuration. A single row, upserted through
/// the API; replaces the request-local mutable configuration the previous
/// system kept in memory.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reminder_config")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub enabled: bool,
    /// Minimum number of days between two reminders to the same adherent.
    pub frequency_days: i32,
    /// Debts below this amount are not reminded.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub minimum_amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
