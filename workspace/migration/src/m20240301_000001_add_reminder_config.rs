use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::reminder_config;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create reminder_config table. A single row is upserted through the
        // API; earlier revisions held this configuration in process memory.
        manager
            .create_table(
                Table::create()
                    .table(ReminderConfig::table())
                    .if_not_exists()
                    .col(pk_auto(ReminderConfig::column(
                        reminder_config::Column::Id,
                    )))
                    .col(boolean(ReminderConfig::column(
                        reminder_config::Column::Enabled,
                    )))
                    .col(integer(ReminderConfig::column(
                        reminder_config::Column::FrequencyDays,
                    )))
                    .col(
                        decimal(ReminderConfig::column(
                            reminder_config::Column::MinimumAmount,
                        ))
                        .decimal_len(16, 4),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReminderConfig::table()).to_owned())
            .await?;

        Ok(())
    }
}
