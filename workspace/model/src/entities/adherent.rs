use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

/// Membership status of an adherent.
///
/// Adherents are never hard-deleted by business flows; leaving the
/// association flips the status to `Inactive` so the financial history
/// stays attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum AdherentStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Inactive")]
    Inactive,
}

/// An association member. Owns zero or more of each ledger record type
/// (payments, initial debts, monthly dues, assistances, credits).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "adherents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub status: AdherentStatus,
    /// Date the adherent joined the association.
    pub joined_on: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
    #[sea_orm(has_many = "super::initial_debt::Entity")]
    InitialDebt,
    #[sea_orm(has_many = "super::monthly_due::Entity")]
    MonthlyDue,
    #[sea_orm(has_many = "super::assistance::Entity")]
    Assistance,
    #[sea_orm(has_many = "super::credit::Entity")]
    Credit,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::initial_debt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InitialDebt.def()
    }
}

impl Related<super::monthly_due::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyDue.def()
    }
}

impl Related<super::assistance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assistance.def()
    }
}

impl Related<super::credit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
