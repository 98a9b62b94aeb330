use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Transactions::Table)
                .if_not_exists()
                .col(ColumnDef::new(Transactions::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Transactions::TxHash).string().not_null())
                .col(ColumnDef::new(Transactions::FromAddress).string().not_null())
                .col(ColumnDef::new(Transactions::ToAddress).string().not_null())
                .col(ColumnDef::new(Transactions::Value).double().not_null())
                .col(ColumnDef::new(Transactions::Chain).string_len(50).not_null())
                .col(ColumnDef::new(Transactions::UserId).string().not_null())
                .col(
                    ColumnDef::new(Transactions::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .to_owned()
        ).await?;

        // Create indexes for faster lookups
        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_transactions_user_id")
                .table(Transactions::Table)
                .col(Transactions::UserId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_transactions_tx_hash")
                .table(Transactions::Table)
                .col(Transactions::TxHash)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Transactions::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    TxHash,
    FromAddress,
    ToAddress,
    Value,
    Chain,
    UserId,
    CreatedAt,
}
