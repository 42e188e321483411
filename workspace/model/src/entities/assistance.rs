use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::adherent;

/// Status of an assistance request. Cancelled assistances are excluded from
/// all aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum AssistanceStatus {
    #[sea_orm(string_value = "Open")]
    Open,
    #[sea_orm(string_value = "Settled")]
    Settled,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// A one-off support obligation tied to an event (funeral, wedding,
/// hardship fund...). Same amount/paid/remaining shape as debts and dues.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assistances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub adherent_id: i32,
    pub label: String,
    /// Date of the event the assistance is linked to.
    pub event_date: NaiveDate,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub paid_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub remaining_amount: Decimal,
    pub status: AssistanceStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "adherent::Entity",
        from = "Column::AdherentId",
        to = "adherent::Column::Id",
        on_delete = "Cascade"
    )]
    Adherent,
}

impl Related<adherent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adherent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
