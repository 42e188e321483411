use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A recurring membership obligation rule (e.g. "standard cotisation").
/// Monthly dues are generated from active due types.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "due_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    /// Expected amount per month.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    #[sea_orm(default_value = "true")]
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::monthly_due::Entity")]
    MonthlyDue,
}

impl Related<super::monthly_due::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyDue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
