use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(create_telegram_users()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TelegramUsers::Table).to_owned())
            .await
    }
}

/// Keyed by the web account only. Lookups by `telegram_id` happen in the bot's
/// own store, so no secondary index is created here.
fn create_telegram_users() -> TableCreateStatement {
    Table::create()
        .table(TelegramUsers::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(TelegramUsers::Id)
                .uuid()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(TelegramUsers::TelegramId)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(TelegramUsers::TelegramUsername)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(TelegramUsers::LastSeenAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(TelegramUsers::Valid)
                .boolean()
                .not_null()
                .default(true),
        )
        .to_owned()
}

#[derive(Iden)]
enum TelegramUsers {
    Table,
    Id,
    TelegramId,
    TelegramUsername,
    LastSeenAt,
    Valid,
}
