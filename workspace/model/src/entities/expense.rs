use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::expense_category;

/// Validation status of an expense. Only `Validated` expenses count in the
/// synthesis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum ExpenseStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Validated")]
    Validated,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

/// A record of money spent by the association.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub label: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: i32,
    pub status: ExpenseStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "expense_category::Entity",
        from = "Column::CategoryId",
        to = "expense_category::Column::Id",
        on_delete = "Cascade"
    )]
    ExpenseCategory,
}

impl Related<expense_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
