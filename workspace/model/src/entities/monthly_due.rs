use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{adherent, due_type};

/// Status of a monthly due (cotisation).
///
/// Invariant: `paid >= expected` => Paid; `0 < paid < expected` =>
/// PartiallyPaid; unpaid => Pending while the period is current, Late once
/// the period's month has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(15))")]
pub enum DueStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "PartiallyPaid")]
    PartiallyPaid,
    #[sea_orm(string_value = "Late")]
    Late,
    #[sea_orm(string_value = "Paid")]
    Paid,
}

/// A single generated cotisation for an adherent and a (year, month) period.
/// This is the 'checklist' item the treasurer tracks (e.g. "June dues").
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "monthly_dues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub adherent_id: i32,
    /// The rule this due was generated from.
    pub due_type_id: i32,
    pub year: i32,
    pub month: i32,
    /// The amount expected for the period, inherited from the due type.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub expected_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub paid_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub remaining_amount: Decimal,
    pub status: DueStatus,
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
        belongs_to = "due_type::Entity",
        from = "Column::DueTypeId",
        to = "due_type::Column::Id",
        on_delete = "Cascade"
    )]
    DueType,
}

impl Related<adherent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adherent.def()
    }
}

impl Related<due_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DueType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
