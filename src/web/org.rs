//! Organization roster management.
//!
//! Every mutation here requires the organization role and is additionally
//! scoped in SQL to the caller's organization id, so a request aimed at
//! another fleet's driver is a no-op.

use axum::{extract::State, response::Response, Form};
use serde::Deserialize;
use tracing::{info, warn};

use super::{notice, PageError, SessionUser};
use crate::db::{self, NewDriver};
use crate::session::{Identity, Role};
use crate::SharedState;

fn require_organization(identity: &Identity) -> Option<Response> {
    if identity.role != Role::Organization {
        return Some(notice(
            "Only organization accounts can manage drivers.",
            "/dashboard",
        ));
    }
    None
}

#[derive(Deserialize)]
pub struct AddDriverForm {
    fullname: String,
    email: String,
    phone: String,
    city: String,
    password: String,
}

pub async fn add_driver(
    State(state): State<SharedState>,
    SessionUser(identity): SessionUser,
    Form(form): Form<AddDriverForm>,
) -> Result<Response, PageError> {
    if let Some(denied) = require_organization(&identity) {
        return Ok(denied);
    }
    if form.fullname.is_empty() || form.email.is_empty() || form.password.is_empty() {
        return Ok(notice("All fields are required.", "/dashboard"));
    }

    let driver = NewDriver {
        fullname: form.fullname,
        email: form.email,
        password_hash: crate::auth::hash_password(&form.password)?,
        phone: form.phone,
        city: form.city,
        org_type: "Organization".to_string(),
        organization_id: Some(identity.id),
        license_file: None,
    };
    db::drivers::insert(&state.db, &driver).await?;

    info!(organization_id = identity.id, email = %driver.email, "driver added to roster");
    Ok(notice("Driver added successfully!", "/dashboard"))
}

#[derive(Deserialize)]
pub struct UpdateDriverForm {
    id: i64,
    fullname: String,
    email: String,
    phone: String,
    city: String,
}

pub async fn update_driver(
    State(state): State<SharedState>,
    SessionUser(identity): SessionUser,
    Form(form): Form<UpdateDriverForm>,
) -> Result<Response, PageError> {
    if let Some(denied) = require_organization(&identity) {
        return Ok(denied);
    }

    let changed = db::drivers::update_for_organization(
        &state.db,
        identity.id,
        form.id,
        &form.fullname,
        &form.email,
        &form.phone,
        &form.city,
    )
    .await?;

    if changed == 0 {
        warn!(
            organization_id = identity.id,
            driver_id = form.id,
            "update targeted a driver outside the caller's fleet"
        );
    }
    Ok(notice("Driver updated successfully!", "/dashboard"))
}

#[derive(Deserialize)]
pub struct DeleteDriverForm {
    id: i64,
}

pub async fn delete_driver(
    State(state): State<SharedState>,
    SessionUser(identity): SessionUser,
    Form(form): Form<DeleteDriverForm>,
) -> Result<Response, PageError> {
    if let Some(denied) = require_organization(&identity) {
        return Ok(denied);
    }

    let deleted = db::drivers::delete_for_organization(&state.db, identity.id, form.id).await?;

    if deleted == 0 {
        warn!(
            organization_id = identity.id,
            driver_id = form.id,
            "delete targeted a driver outside the caller's fleet"
        );
    } else {
        info!(
            organization_id = identity.id,
            driver_id = form.id,
            "driver removed from roster"
        );
    }
    Ok(notice("Driver deleted successfully!", "/dashboard"))
}
