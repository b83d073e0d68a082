use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::sea_orm::{ActiveEnum, DbBackend, Schema};

use lever_entities::{position, telegram_user, user, Status};

pub(crate) const POSITION_USER_ID_INDEX: &str = "idx_position_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // SQLite keeps enum columns as plain text.
        if backend == DbBackend::Postgres {
            manager.create_type(schema.create_enum_from_active_enum::<Status>()).await?;
        }

        manager.create_table(schema.create_table_from_entity(user::Entity)).await?;
        manager.create_table(schema.create_table_from_entity(position::Entity)).await?;
        manager.create_table(schema.create_table_from_entity(telegram_user::Entity)).await?;

        manager
            .create_index(
                Index::create()
                    .name(POSITION_USER_ID_INDEX)
                    .table(position::Entity)
                    .col(position::Column::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(POSITION_USER_ID_INDEX).table(position::Entity).to_owned())
            .await?;

        manager.drop_table(Table::drop().table(telegram_user::Entity).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(position::Entity).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(user::Entity).if_exists().to_owned()).await?;

        if manager.get_database_backend() == DbBackend::Postgres {
            manager.drop_type(Type::drop().if_exists().name(Status::name()).to_owned()).await?;
        }

        Ok(())
    }
}
