pub mod position;
pub mod status;
pub mod telegram_user;
pub mod user;

pub use status::{Status, UnknownStatus};

/// Current UTC wall-clock time, the representation stored in timestamp columns.
pub(crate) fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}
