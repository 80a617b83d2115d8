//! Booking lifecycle handlers.

use axum::{extract::State, response::Response, Form};
use serde::Deserialize;
use tracing::info;

use super::{notice, PageError, SessionUser};
use crate::db::{self, NewBooking};
use crate::session::Role;
use crate::SharedState;

#[derive(Deserialize)]
pub struct BookForm {
    pickup_address: String,
    drop_address: String,
    pickup_time: String,
    start_date: String,
    end_date: String,
}

pub async fn book(
    State(state): State<SharedState>,
    SessionUser(identity): SessionUser,
    Form(form): Form<BookForm>,
) -> Result<Response, PageError> {
    if identity.role != Role::User {
        return Ok(notice("Only rider accounts can book a ride.", "/dashboard"));
    }
    if form.pickup_address.is_empty() || form.drop_address.is_empty() {
        return Ok(notice("Pickup and drop addresses are required.", "/dashboard"));
    }

    // Simple matching rule: a driver in the rider's own city when one
    // exists, otherwise the first registered driver.
    let city = match db::users::find_by_id(&state.db, identity.id).await? {
        Some(user) => user.city,
        None => String::new(),
    };
    let driver_id = db::drivers::pick_for_city(&state.db, &city).await?;

    let booking = NewBooking {
        user_id: identity.id,
        driver_id,
        pickup_address: form.pickup_address,
        drop_address: form.drop_address,
        pickup_time: form.pickup_time,
        start_date: form.start_date,
        end_date: form.end_date,
    };
    let booking_id = db::bookings::insert(&state.db, &booking).await?;

    info!(booking_id, user_id = identity.id, ?driver_id, "booking created");
    Ok(notice("Ride booked successfully!", "/dashboard"))
}

#[derive(Deserialize)]
pub struct RideForm {
    booking_id: i64,
}

/// Claim and confirm a booking. Any authenticated caller may confirm any
/// booking id and becomes its driver; this matches the documented behavior
/// of the platform (see DESIGN.md for the known authorization gap).
pub async fn confirm_ride(
    State(state): State<SharedState>,
    SessionUser(identity): SessionUser,
    Form(form): Form<RideForm>,
) -> Result<Response, PageError> {
    let changed = db::bookings::confirm(&state.db, form.booking_id, identity.id).await?;

    info!(
        booking_id = form.booking_id,
        claimed_by = identity.id,
        role = %identity.role,
        changed,
        "ride confirmed"
    );
    Ok(notice("Ride confirmed successfully!", "/dashboard"))
}

/// Cancel a booking. The repository scopes the update to the owning rider,
/// so anyone else's attempt changes nothing.
pub async fn cancel_ride(
    State(state): State<SharedState>,
    SessionUser(identity): SessionUser,
    Form(form): Form<RideForm>,
) -> Result<Response, PageError> {
    let changed = db::bookings::cancel(&state.db, form.booking_id, identity.id).await?;

    info!(
        booking_id = form.booking_id,
        user_id = identity.id,
        changed,
        "ride cancellation requested"
    );
    Ok(notice("Ride cancelled successfully.", "/dashboard"))
}
