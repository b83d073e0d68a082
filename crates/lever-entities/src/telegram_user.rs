use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;

/// A Telegram identity, optionally linked to a wallet-based [`super::user`].
///
/// The link goes through `user.wallet_id` rather than the user's primary key,
/// since the wallet id is the identifier both platforms share.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize)]
#[sea_orm(table_name = "telegram_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub telegram_id: String,

    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub wallet_id: Option<String>,
    pub photo_url: Option<String>,

    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_at: chrono::NaiveDateTime,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::WalletId",
        to = "super::user::Column::WalletId"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4()),
            ..ActiveModelTrait::default()
        }
    }

    /// Stamps both timestamps on insert and refreshes `updated_at` on every update.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = crate::now();

        if insert {
            if self.id.is_not_set() {
                self.id = ActiveValue::Set(Uuid::new_v4());
            }
            if self.created_at.is_not_set() {
                self.created_at = ActiveValue::Set(now);
            }
        }
        self.updated_at = ActiveValue::Set(now);

        Ok(self)
    }
}
