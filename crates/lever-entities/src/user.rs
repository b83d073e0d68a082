use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;

/// A wallet-based user. Created the first time a wallet is seen; the contract
/// fields are filled in later, once the user's contract is deployed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(default_value = false)]
    pub is_contract_deployed: bool,

    // Referenced by `telegram_user.wallet_id`, which needs a unique target.
    #[sea_orm(unique)]
    pub wallet_id: String,
    pub contract_address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::position::Entity")]
    Positions,
    #[sea_orm(has_many = "super::telegram_user::Entity")]
    TelegramUsers,
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Positions.def()
    }
}

impl Related<super::telegram_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TelegramUsers.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Assigns a fresh random id; `is_contract_deployed` starts out false.
    fn new() -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4()),
            is_contract_deployed: ActiveValue::Set(false),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.id.is_not_set() {
            self.id = ActiveValue::Set(Uuid::new_v4());
        }

        Ok(self)
    }
}
