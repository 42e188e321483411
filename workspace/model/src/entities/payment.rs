use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::adherent;

/// Validation status of a payment. Only `Validated` payments count as
/// receipts in the synthesis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Validated")]
    Validated,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

/// How the money was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "Cash")]
    Cash,
    #[sea_orm(string_value = "Cheque")]
    Cheque,
    #[sea_orm(string_value = "Transfer")]
    Transfer,
    #[sea_orm(string_value = "Card")]
    Card,
}

/// A record of money received from an adherent. Immutable once validated,
/// except for status corrections.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub adherent_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    /// Cheque number, bank transfer reference, etc.
    pub reference: Option<String>,
    pub status: PaymentStatus,
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
