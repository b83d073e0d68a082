use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;

use crate::Status;

/// A user's leveraged holding in a token.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize)]
#[sea_orm(table_name = "position")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,

    pub token_symbol: String,
    /// Decimal quantity kept as text so no precision is lost in transit.
    pub amount: String,
    pub multiplier: i32,

    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_at: chrono::NaiveDateTime,
    #[sea_orm(default_value = "pending")]
    pub status: Option<Status>,
}

impl Model {
    /// The stored status, with a null column read as `pending`.
    pub fn effective_status(&self) -> Status {
        self.status.unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
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
            status: ActiveValue::Set(Some(Status::Pending)),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            if self.id.is_not_set() {
                self.id = ActiveValue::Set(Uuid::new_v4());
            }
            if self.created_at.is_not_set() {
                self.created_at = ActiveValue::Set(crate::now());
            }
        }

        Ok(self)
    }
}
