use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::adherent;

/// A legacy/opening balance owed by an adherent for a given year.
///
/// Invariant (maintained in application logic, not at the database level):
/// `remaining_amount = amount - paid_amount`, floored at 0.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "initial_debts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub adherent_id: i32,
    /// The year the debt was carried over from.
    pub year: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub paid_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub remaining_amount: Decimal,
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
