use sea_orm::entity::prelude::*;

/// Telegram account linked to a web account. One row per web account; relinking
/// overwrites the Telegram side.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "telegram_users")]
pub struct Model {
    /// Web account id (identity provider user id).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub telegram_id: i64,
    pub telegram_username: String,
    pub last_seen_at: chrono::DateTime<chrono::Utc>,
    pub valid: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
