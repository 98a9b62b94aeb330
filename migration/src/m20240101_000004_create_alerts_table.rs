use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Alerts::Table)
                .if_not_exists()
                .col(ColumnDef::new(Alerts::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Alerts::Symbol).string().not_null())
                .col(ColumnDef::new(Alerts::TargetPrice).double().not_null())
                .col(ColumnDef::new(Alerts::Condition).string_len(10).not_null()) // "above", "below"
                .col(ColumnDef::new(Alerts::UserId).string().not_null())
                .col(
                    ColumnDef::new(Alerts::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_alerts_user_id")
                .table(Alerts::Table)
                .col(Alerts::UserId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Alerts::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum Alerts {
    Table,
    Id,
    Symbol,
    TargetPrice,
    Condition,
    UserId,
    CreatedAt,
}
