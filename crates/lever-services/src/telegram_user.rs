use sea_orm::prelude::*;
use sea_orm::ActiveValue;

use lever_entities::{telegram_user, user};

use crate::user::normalize_wallet_id;
use crate::{Error, Result};

/// Profile fields as reported by Telegram.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct TelegramProfile {
    pub telegram_id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Service {
    db: DatabaseConnection,
}

impl Service {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[tracing::instrument(skip(self))]
    pub async fn register(&self, profile: TelegramProfile) -> Result<telegram_user::Model> {
        if profile.telegram_id.trim().is_empty() {
            return Err(Error::InvalidInput("telegram id must not be empty".into()));
        }

        let telegram_user = telegram_user::ActiveModel {
            telegram_id: ActiveValue::Set(profile.telegram_id),
            username: ActiveValue::Set(profile.username),
            first_name: ActiveValue::Set(profile.first_name),
            last_name: ActiveValue::Set(profile.last_name),
            photo_url: ActiveValue::Set(profile.photo_url),
            ..Default::default()
        }
            .insert(&self.db)
            .await?;

        tracing::debug!(telegram_user_id = %telegram_user.id, "Telegram user registered");

        Ok(telegram_user)
    }

    /// Registers the profile, or refreshes the stored profile fields if the
    /// Telegram id is already known. The wallet link is left untouched.
    #[tracing::instrument(skip(self))]
    pub async fn upsert(&self, profile: TelegramProfile) -> Result<telegram_user::Model> {
        let Some(existing) = self.find_by_telegram_id(&profile.telegram_id).await? else {
            return self.register(profile).await;
        };

        let mut telegram_user: telegram_user::ActiveModel = existing.into();
        telegram_user.username = ActiveValue::Set(profile.username);
        telegram_user.first_name = ActiveValue::Set(profile.first_name);
        telegram_user.last_name = ActiveValue::Set(profile.last_name);
        telegram_user.photo_url = ActiveValue::Set(profile.photo_url);

        Ok(telegram_user.update(&self.db).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_telegram_id(&self, telegram_id: &str) -> Result<Option<telegram_user::Model>> {
        let telegram_user = telegram_user::Entity::find()
            .filter(telegram_user::Column::TelegramId.eq(telegram_id))
            .one(&self.db)
            .await?;

        Ok(telegram_user)
    }

    /// Links the Telegram account to the user owning `wallet_id`.
    #[tracing::instrument(skip(self))]
    pub async fn link_wallet(&self, telegram_id: &str, wallet_id: &str) -> Result<telegram_user::Model> {
        let wallet_id = normalize_wallet_id(wallet_id)?;
        self.set_wallet(telegram_id, Some(wallet_id.to_string())).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn unlink_wallet(&self, telegram_id: &str) -> Result<telegram_user::Model> {
        self.set_wallet(telegram_id, None).await
    }

    /// Resolves the wallet-based user behind a Telegram account, if linked.
    #[tracing::instrument(skip(self))]
    pub async fn find_user(&self, telegram_id: &str) -> Result<Option<user::Model>> {
        let telegram_user = self
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("telegram user {telegram_id}")))?;

        let user = telegram_user
            .find_related(user::Entity)
            .one(&self.db)
            .await?;

        Ok(user)
    }

    async fn set_wallet(&self, telegram_id: &str, wallet_id: Option<String>) -> Result<telegram_user::Model> {
        let telegram_user = self
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("telegram user {telegram_id}")))?;

        let mut telegram_user: telegram_user::ActiveModel = telegram_user.into();
        telegram_user.wallet_id = ActiveValue::Set(wallet_id);

        Ok(telegram_user.update(&self.db).await?)
    }
}
