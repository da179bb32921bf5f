use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use autopm_domain::id::{OtcId, UserId};
use autopm_login_schema::{otc_codes, telegram_users};

use crate::domain::repository::OtcRepository;
use crate::domain::types::{OtcBinding, Redemption, TelegramAccount, TelegramLink};
use crate::error::LinkServiceError;

// ── OTC repository ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtcRepository {
    pub db: DatabaseConnection,
}

impl OtcRepository for DbOtcRepository {
    async fn insert(&self, binding: &OtcBinding) -> Result<(), LinkServiceError> {
        otc_codes::ActiveModel {
            id: Set(binding.id.0),
            code: Set(binding.code.clone()),
            user_id: Set(binding.user_id.0),
            expires_at: Set(binding.expires_at),
            used_at: Set(binding.used_at),
            created_at: Set(binding.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert one-time code")?;
        Ok(())
    }

    async fn redeem(
        &self,
        code: &str,
        account: &TelegramAccount,
        now: DateTime<Utc>,
    ) -> Result<Redemption, LinkServiceError> {
        let code = code.to_owned();
        let account = account.clone();
        let redemption = self
            .db
            .transaction::<_, Redemption, DbErr>(|txn| {
                Box::pin(async move { claim_and_link(txn, &code, &account, now).await })
            })
            .await
            .context("redeem one-time code")?;
        Ok(redemption)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, LinkServiceError> {
        let result = otc_codes::Entity::delete_many()
            .filter(otc_codes::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .context("delete expired one-time codes")?;
        Ok(result.rows_affected)
    }
}

async fn claim_and_link(
    txn: &DatabaseTransaction,
    code: &str,
    account: &TelegramAccount,
    now: DateTime<Utc>,
) -> Result<Redemption, DbErr> {
    let candidate = otc_codes::Entity::find()
        .filter(otc_codes::Column::Code.eq(code))
        .filter(otc_codes::Column::UsedAt.is_null())
        .filter(otc_codes::Column::CreatedAt.lte(now))
        .filter(otc_codes::Column::ExpiresAt.gt(now))
        .order_by_desc(otc_codes::Column::CreatedAt)
        .one(txn)
        .await?;

    let Some(model) = candidate else {
        return classify_unclaimable(txn, code, now).await;
    };

    // Conditional on `used_at IS NULL`: of two concurrent redeemers only one
    // updates a row.
    let claimed = otc_codes::Entity::update_many()
        .col_expr(otc_codes::Column::UsedAt, Expr::value(now))
        .filter(otc_codes::Column::Id.eq(model.id))
        .filter(otc_codes::Column::UsedAt.is_null())
        .exec(txn)
        .await?;
    if claimed.rows_affected == 0 {
        return Ok(Redemption::AlreadyUsed);
    }

    let mut binding = otc_from_model(model);
    binding.used_at = Some(now);

    upsert_telegram_link(txn, &TelegramLink::new(binding.user_id, account, now)).await?;
    Ok(Redemption::Claimed(binding))
}

async fn classify_unclaimable(
    txn: &DatabaseTransaction,
    code: &str,
    now: DateTime<Utc>,
) -> Result<Redemption, DbErr> {
    let latest = otc_codes::Entity::find()
        .filter(otc_codes::Column::Code.eq(code))
        .order_by_desc(otc_codes::Column::CreatedAt)
        .one(txn)
        .await?
        .map(otc_from_model);

    Ok(Redemption::classify(latest.as_ref(), now))
}

async fn upsert_telegram_link(
    txn: &DatabaseTransaction,
    link: &TelegramLink,
) -> Result<(), DbErr> {
    let model = telegram_users::ActiveModel {
        id: Set(link.user_id.0),
        telegram_id: Set(link.telegram_id.0),
        telegram_username: Set(link.telegram_username.clone()),
        last_seen_at: Set(link.last_seen_at),
        valid: Set(link.valid),
    };
    telegram_users::Entity::insert(model)
        .on_conflict(
            OnConflict::column(telegram_users::Column::Id)
                .update_columns([
                    telegram_users::Column::TelegramId,
                    telegram_users::Column::TelegramUsername,
                    telegram_users::Column::LastSeenAt,
                    telegram_users::Column::Valid,
                ])
                .to_owned(),
        )
        .exec(txn)
        .await?;
    Ok(())
}

fn otc_from_model(model: otc_codes::Model) -> OtcBinding {
    OtcBinding {
        id: OtcId(model.id),
        code: model.code,
        user_id: UserId(model.user_id),
        expires_at: model.expires_at,
        used_at: model.used_at,
        created_at: model.created_at,
    }
}
