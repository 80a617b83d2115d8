//! Rider account repository.

use sqlx::Result;

use super::{DbPool, NewUser, User};

pub async fn insert(pool: &DbPool, user: &NewUser) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO users (fullname, email, password_hash, phone, city) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&user.fullname)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.phone)
    .bind(&user.city)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}
