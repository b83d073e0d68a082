use std::str::FromStr;

use sea_orm::entity::prelude::*;

/// Lifecycle stage of a position.
///
/// Stored in the `status_enum` database type. Positions move forward only:
/// `pending` → `opened` → `closed`, with `pending` → `closed` for positions
/// that never opened.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, serde::Serialize, serde::Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "status_enum")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "opened")]
    Opened,
    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown position status: {0:?}")]
pub struct UnknownStatus(pub String);

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::Opened, Status::Closed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Opened => "opened",
            Status::Closed => "closed",
        }
    }

    /// Every accepted string value, in declaration order.
    pub fn choices() -> [&'static str; 3] {
        Self::ALL.map(Status::as_str)
    }

    const fn rank(self) -> u8 {
        match self {
            Status::Pending => 0,
            Status::Opened => 1,
            Status::Closed => 2,
        }
    }

    pub const fn can_transition_to(self, next: Status) -> bool {
        next.rank() > self.rank()
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
