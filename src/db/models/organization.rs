//! Organization (fleet operator) account model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Organization {
    pub id: i64,
    pub company_name: String,
    pub reg_number: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub company_name: String,
    pub reg_number: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
}
