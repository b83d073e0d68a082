use sea_orm::{DbErr, SqlErr};

use lever_entities::Status;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(DbErr),
    #[error("Duplicate record: {0}")]
    Duplicate(String),
    #[error("Referenced record does not exist: {0}")]
    MissingReference(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("Position cannot move from {} to {}", .from.as_str(), .to.as_str())]
    InvalidTransition { from: Status, to: Status },
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Error::Duplicate(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Error::MissingReference(detail),
            _ => Error::DatabaseError(err),
        }
    }
}
