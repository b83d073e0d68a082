use rust_decimal::Decimal;
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, QueryOrder};

use lever_entities::{position, Status};

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct NewPosition {
    pub user_id: Uuid,
    pub token_symbol: String,
    pub amount: String,
    pub multiplier: i32,
}

#[derive(Clone, Debug)]
pub struct Service {
    db: DatabaseConnection,
}

/// Parses a position amount: plain digits with an optional fractional part,
/// representable without rounding. Only `-0` may carry a sign.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let invalid = || Error::InvalidAmount(raw.to_string());

    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|&c| c == '.').count() <= 1
        && digits.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    let amount = Decimal::from_str_exact(trimmed).map_err(|_| invalid())?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(invalid());
    }

    Ok(amount.abs())
}

/// Reads the stored textual amount back as a decimal.
pub fn amount_of(position: &position::Model) -> Result<Decimal> {
    parse_amount(&position.amount)
}

impl Service {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new `pending` position for an existing user.
    #[tracing::instrument(skip(self))]
    pub async fn open_position(&self, new: NewPosition) -> Result<position::Model> {
        let token_symbol = new.token_symbol.trim();
        if token_symbol.is_empty() {
            return Err(Error::InvalidInput("token symbol must not be empty".into()));
        }
        if new.multiplier < 1 {
            return Err(Error::InvalidInput(format!("multiplier must be at least 1, got {}", new.multiplier)));
        }
        let amount = parse_amount(&new.amount)?;

        let position = position::ActiveModel {
            user_id: ActiveValue::Set(new.user_id),
            token_symbol: ActiveValue::Set(token_symbol.to_string()),
            amount: ActiveValue::Set(amount.to_string()),
            multiplier: ActiveValue::Set(new.multiplier),
            ..Default::default()
        }
            .insert(&self.db)
            .await?;

        tracing::debug!(position_id = %position.id, "Position added");

        Ok(position)
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<position::Model>> {
        Ok(position::Entity::find_by_id(id).one(&self.db).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<position::Model>> {
        let positions = position::Entity::find()
            .filter(position::Column::UserId.eq(user_id))
            .order_by_asc(position::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(positions)
    }

    /// Moves a position forward in its lifecycle. A null status counts as `pending`.
    #[tracing::instrument(skip(self))]
    pub async fn transition(&self, id: Uuid, next: Status) -> Result<position::Model> {
        let position = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("position {id}")))?;

        let current = position.effective_status();
        if !current.can_transition_to(next) {
            return Err(Error::InvalidTransition { from: current, to: next });
        }

        let mut position: position::ActiveModel = position.into();
        position.status = ActiveValue::Set(Some(next));
        let position = position.update(&self.db).await?;

        tracing::info!(position_id = %position.id, from = current.as_str(), to = next.as_str(), "Position status changed");

        Ok(position)
    }

    pub async fn mark_opened(&self, id: Uuid) -> Result<position::Model> {
        self.transition(id, Status::Opened).await
    }

    pub async fn mark_closed(&self, id: Uuid) -> Result<position::Model> {
        self.transition(id, Status::Closed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_keeps_its_scale() {
        assert_eq!(parse_amount("1.50").unwrap().to_string(), "1.50");
        assert_eq!(parse_amount(" 0.000000000000000001 ").unwrap().to_string(), "0.000000000000000001");
        assert_eq!(parse_amount("-0").unwrap().to_string(), "0");
    }

    #[test]
    fn amount_is_never_rounded() {
        for raw in ["0.12345678901234567890123456789", "1234567890.1234567890123456789012"] {
            assert!(
                matches!(parse_amount(raw), Err(Error::InvalidAmount(_))),
                "rounded {raw:?}"
            );
        }
        assert_eq!(
            parse_amount("0.1234567890123456789012345678").unwrap().to_string(),
            "0.1234567890123456789012345678"
        );
    }

    #[test]
    fn amount_rejects_negative_and_garbage() {
        for raw in ["-1", "-0.01", "", ".", "abc", "1.2.3", "NaN", "1e5", "+5", "1_000"] {
            assert!(
                matches!(parse_amount(raw), Err(Error::InvalidAmount(ref r)) if r == raw),
                "accepted {raw:?}"
            );
        }
    }
}
