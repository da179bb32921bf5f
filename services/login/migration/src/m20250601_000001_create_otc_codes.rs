use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OtcCodes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OtcCodes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(OtcCodes::Code).string_len(16).not_null())
                    .col(ColumnDef::new(OtcCodes::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(OtcCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OtcCodes::UsedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(OtcCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Redemption looks codes up by value; the reaper scans by expiry.
        manager
            .create_index(
                Index::create()
                    .table(OtcCodes::Table)
                    .col(OtcCodes::Code)
                    .name("idx_otc_codes_code")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(OtcCodes::Table)
                    .col(OtcCodes::ExpiresAt)
                    .name("idx_otc_codes_expires_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OtcCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OtcCodes {
    Table,
    Id,
    Code,
    UserId,
    ExpiresAt,
    UsedAt,
    CreatedAt,
}
