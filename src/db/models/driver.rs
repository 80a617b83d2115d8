//! Driver account model.
//!
//! A driver is either independent or affiliated with an organization, in
//! which case `organization_id` names the owning fleet and only that
//! organization may update or delete the row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub city: String,
    pub org_type: String,
    pub organization_id: Option<i64>,
    pub license_file: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewDriver {
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub city: String,
    pub org_type: String,
    pub organization_id: Option<i64>,
    pub license_file: Option<String>,
}

/// Directory entry shown to riders on the dashboard.
#[derive(Debug, Clone, FromRow)]
pub struct DriverSummary {
    pub id: i64,
    pub fullname: String,
    pub city: String,
}
