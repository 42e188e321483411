pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_tables;
mod m20240301_000001_add_reminder_config;
pub mod entity_iden;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_tables::Migration),
            Box::new(m20240301_000001_add_reminder_config::Migration),
        ]
    }
}
