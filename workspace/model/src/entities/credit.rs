use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{adherent, payment};

/// Status of a credit (avoir). Only `Available` credits with positive
/// remaining amount are netted against debts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum CreditStatus {
    #[sea_orm(string_value = "Available")]
    Available,
    #[sea_orm(string_value = "Exhausted")]
    Exhausted,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// A positive balance owed back to an adherent, usable against future
/// debts. Issued manually or from the surplus of an overpayment.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub adherent_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub used_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub remaining_amount: Decimal,
    pub status: CreditStatus,
    pub issued_on: NaiveDate,
    /// The validated payment whose surplus issued this credit, if any.
    pub source_payment_id: Option<i32>,
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
    #[sea_orm(
        belongs_to = "payment::Entity",
        from = "Column::SourcePaymentId",
        to = "payment::Column::Id",
        on_delete = "SetNull"
    )]
    Payment,
}

impl Related<adherent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adherent.def()
    }
}

impl Related<payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
