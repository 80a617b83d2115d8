//! Booking repository.
//!
//! Status strings follow the `BookingStatus` lifecycle: Scheduled at
//! creation, Confirmed when a driver claims the ride, Cancelled by the
//! owning rider.

use sqlx::Result;

use super::{BookingStatus, BookingWithDriver, BookingWithRider, DbPool, NewBooking};

pub async fn insert(pool: &DbPool, booking: &NewBooking) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO bookings \
         (user_id, driver_id, pickup_address, drop_address, pickup_time, start_date, end_date, \
          status, confirmed) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0)",
    )
    .bind(booking.user_id)
    .bind(booking.driver_id)
    .bind(&booking.pickup_address)
    .bind(&booking.drop_address)
    .bind(&booking.pickup_time)
    .bind(&booking.start_date)
    .bind(&booking.end_date)
    .bind(BookingStatus::Scheduled.to_string())
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Rides belonging to a rider, newest first, with the assigned driver's name.
pub async fn list_for_user(pool: &DbPool, user_id: i64) -> Result<Vec<BookingWithDriver>> {
    sqlx::query_as(
        "SELECT b.id, b.pickup_address, b.drop_address, b.pickup_time, b.start_date, \
                b.end_date, b.status, b.confirmed, b.created_at, d.fullname AS driver_name \
         FROM bookings b \
         LEFT JOIN drivers d ON b.driver_id = d.id \
         WHERE b.user_id = ? ORDER BY b.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Rides assigned to a driver, newest first, with the rider's name.
pub async fn list_for_driver(pool: &DbPool, driver_id: i64) -> Result<Vec<BookingWithRider>> {
    sqlx::query_as(
        "SELECT b.id, b.pickup_address, b.drop_address, b.pickup_time, b.start_date, \
                b.end_date, b.status, b.confirmed, b.created_at, u.fullname AS user_name \
         FROM bookings b \
         LEFT JOIN users u ON b.user_id = u.id \
         WHERE b.driver_id = ? ORDER BY b.created_at DESC",
    )
    .bind(driver_id)
    .fetch_all(pool)
    .await
}

/// Mark a booking confirmed and hand it to the caller. Any authenticated
/// identity may claim any booking by id; see DESIGN.md for why this known
/// gap is kept rather than silently fixed.
pub async fn confirm(pool: &DbPool, booking_id: i64, claiming_driver_id: i64) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE bookings SET confirmed = 1, status = ?, driver_id = ? WHERE id = ?",
    )
    .bind(BookingStatus::Confirmed.to_string())
    .bind(claiming_driver_id)
    .bind(booking_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Cancel a booking. Scoped to the owning rider; a non-owner's attempt
/// matches no rows and is a no-op.
pub async fn cancel(pool: &DbPool, booking_id: i64, user_id: i64) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE bookings SET status = ?, confirmed = 0 WHERE id = ? AND user_id = ?",
    )
    .bind(BookingStatus::Cancelled.to_string())
    .bind(booking_id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
