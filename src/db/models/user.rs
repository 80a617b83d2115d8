//! Rider account model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub city: String,
    pub created_at: String,
}

/// Fields accepted at rider registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub city: String,
}
