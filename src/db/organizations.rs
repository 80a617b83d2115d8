//! Organization account repository.

use sqlx::Result;

use super::{DbPool, NewOrganization, Organization};

pub async fn insert(pool: &DbPool, org: &NewOrganization) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO organizations (company_name, reg_number, email, password_hash, phone) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&org.company_name)
    .bind(&org.reg_number)
    .bind(&org.email)
    .bind(&org.password_hash)
    .bind(&org.phone)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<Organization>> {
    sqlx::query_as("SELECT * FROM organizations WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}
