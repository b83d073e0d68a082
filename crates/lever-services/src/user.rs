use sea_orm::prelude::*;
use sea_orm::ActiveValue;

use lever_entities::user;

use crate::{Error, Result};

/// Wallet ids are compared after trimming surrounding whitespace; blank ids are rejected.
pub(crate) fn normalize_wallet_id(wallet_id: &str) -> Result<&str> {
    let wallet_id = wallet_id.trim();
    if wallet_id.is_empty() {
        return Err(Error::InvalidInput("wallet id must not be empty".into()));
    }

    Ok(wallet_id)
}

#[derive(Clone, Debug)]
pub struct Service {
    db: DatabaseConnection,
}

impl Service {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the user owning `wallet_id`, creating it on first sight.
    #[tracing::instrument(skip(self))]
    pub async fn create_or_find_user(&self, wallet_id: &str) -> Result<user::Model> {
        let wallet_id = normalize_wallet_id(wallet_id)?;

        if let Some(user) = self.find_by_wallet_id(wallet_id).await? {
            return Ok(user);
        }

        let inserted = user::ActiveModel {
            wallet_id: ActiveValue::Set(wallet_id.to_string()),
            ..Default::default()
        }
            .insert(&self.db)
            .await;

        match inserted.map_err(Error::from) {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "User created");
                Ok(user)
            }
            // Lost a race against another insert of the same wallet.
            Err(Error::Duplicate(_)) => self
                .find_by_wallet_id(wallet_id)
                .await?
                .ok_or_else(|| Error::NotFound(format!("user with wallet {wallet_id}"))),
            Err(err) => Err(err),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_wallet_id(&self, wallet_id: &str) -> Result<Option<user::Model>> {
        let wallet_id = normalize_wallet_id(wallet_id)?;
        let user = user::Entity::find()
            .filter(user::Column::WalletId.eq(wallet_id))
            .one(&self.db)
            .await?;

        Ok(user)
    }

    /// Records the outcome of the external contract deployment for a wallet.
    #[tracing::instrument(skip(self))]
    pub async fn mark_contract_deployed(&self, wallet_id: &str, contract_address: String) -> Result<user::Model> {
        let wallet_id = normalize_wallet_id(wallet_id)?;
        let user = self
            .find_by_wallet_id(wallet_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user with wallet {wallet_id}")))?;

        let mut user: user::ActiveModel = user.into();
        user.is_contract_deployed = ActiveValue::Set(true);
        user.contract_address = ActiveValue::Set(Some(contract_address));

        let user = user.update(&self.db).await?;
        tracing::debug!(user_id = %user.id, "Contract deployment recorded");

        Ok(user)
    }
}
