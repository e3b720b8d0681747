//! User Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::ids::TypedId;

/// User ID
pub type UserId = TypedId<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Vendor approval state. Only approved vendors have their products listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorStatus {
    Pending,
    Approved,
    Rejected,
}

impl VendorStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown vendor status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vendor status: {0}")]
pub struct UnknownVendorStatus(pub String);

impl FromStr for VendorStatus {
    type Err = UnknownVendorStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownVendorStatus(other.to_string())),
        }
    }
}

/// Vendor Record
///
/// The selling identity attached to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRecord {
    pub user_id: UserId,
    pub status: VendorStatus,
    pub store_name: String,
    pub store_address: Option<String>,
}
