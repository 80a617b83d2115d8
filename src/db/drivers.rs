//! Driver account repository.
//!
//! Mutations that belong to a fleet take the owning organization id and
//! scope their WHERE clause to it, so one organization can never touch
//! another fleet's roster.

use sqlx::Result;

use super::{DbPool, Driver, DriverSummary, NewDriver};

pub async fn insert(pool: &DbPool, driver: &NewDriver) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO drivers \
         (fullname, email, password_hash, phone, city, org_type, organization_id, license_file) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&driver.fullname)
    .bind(&driver.email)
    .bind(&driver.password_hash)
    .bind(&driver.phone)
    .bind(&driver.city)
    .bind(&driver.org_type)
    .bind(driver.organization_id)
    .bind(&driver.license_file)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<Driver>> {
    sqlx::query_as("SELECT * FROM drivers WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Directory of all drivers, shown to riders.
pub async fn list_summaries(pool: &DbPool) -> Result<Vec<DriverSummary>> {
    sqlx::query_as("SELECT id, fullname, city FROM drivers ORDER BY fullname ASC")
        .fetch_all(pool)
        .await
}

pub async fn list_for_organization(pool: &DbPool, organization_id: i64) -> Result<Vec<Driver>> {
    sqlx::query_as("SELECT * FROM drivers WHERE organization_id = ? ORDER BY fullname ASC")
        .bind(organization_id)
        .fetch_all(pool)
        .await
}

/// Pick a driver for a new booking: prefer one based in the rider's city,
/// otherwise fall back to the first registered driver. A deliberately simple
/// matching rule; there is no availability or capacity tracking.
pub async fn pick_for_city(pool: &DbPool, city: &str) -> Result<Option<i64>> {
    let local: Option<i64> =
        sqlx::query_scalar("SELECT id FROM drivers WHERE city = ? ORDER BY id ASC LIMIT 1")
            .bind(city)
            .fetch_optional(pool)
            .await?;
    if local.is_some() {
        return Ok(local);
    }
    sqlx::query_scalar("SELECT id FROM drivers ORDER BY id ASC LIMIT 1")
        .fetch_optional(pool)
        .await
}

/// Update a roster entry. Returns the number of rows changed; zero when the
/// driver does not belong to the given organization.
pub async fn update_for_organization(
    pool: &DbPool,
    organization_id: i64,
    driver_id: i64,
    fullname: &str,
    email: &str,
    phone: &str,
    city: &str,
) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE drivers SET fullname = ?, email = ?, phone = ?, city = ? \
         WHERE id = ? AND organization_id = ?",
    )
    .bind(fullname)
    .bind(email)
    .bind(phone)
    .bind(city)
    .bind(driver_id)
    .bind(organization_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Delete a roster entry, first detaching any bookings that reference it so
/// no dangling foreign keys remain. Both statements run in one transaction;
/// if the driver is not owned by the caller nothing is committed.
pub async fn delete_for_organization(
    pool: &DbPool,
    organization_id: i64,
    driver_id: i64,
) -> Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE bookings SET driver_id = NULL WHERE driver_id = ?")
        .bind(driver_id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM drivers WHERE id = ? AND organization_id = ?")
        .bind(driver_id)
        .bind(organization_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        // Not this fleet's driver; undo the booking detach.
        tx.rollback().await?;
        return Ok(0);
    }

    tx.commit().await?;
    Ok(deleted)
}
