//! User Data

use crate::domain::users::records::{UserId, VendorStatus};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Vendor Profile Data
#[derive(Debug, Clone, PartialEq)]
pub struct VendorProfile {
    pub user_id: UserId,
    pub status: VendorStatus,
    pub store_name: String,
    pub store_address: Option<String>,
}
