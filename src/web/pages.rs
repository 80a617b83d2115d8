//! Public page handlers.

use axum::{extract::State, response::Response, Form};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::info;

use super::templates::*;
use super::{current_identity, notice, render_template};
use crate::SharedState;

pub async fn index(State(state): State<SharedState>, jar: CookieJar) -> Response {
    let logged_in = current_identity(&state, &jar).is_some();
    render_template(IndexTemplate { logged_in })
}

pub async fn about() -> Response {
    render_template(AboutTemplate)
}

pub async fn car_list() -> Response {
    render_template(CarListTemplate)
}

pub async fn contact() -> Response {
    render_template(ContactTemplate)
}

pub async fn registration() -> Response {
    render_template(RegistrationTemplate)
}

pub async fn driver_registration() -> Response {
    render_template(DriverRegistrationTemplate)
}

pub async fn organization_registration() -> Response {
    render_template(OrganizationRegistrationTemplate)
}

#[derive(Deserialize)]
pub struct ContactForm {
    name: String,
    email: String,
    phone: String,
    message: String,
}

/// Contact messages are logged server-side only; nothing is persisted.
pub async fn contact_submit(Form(form): Form<ContactForm>) -> Response {
    info!(
        name = %form.name,
        email = %form.email,
        phone = %form.phone,
        message = %form.message,
        "contact form submission"
    );
    notice("Message received!", "/index")
}
