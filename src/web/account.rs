//! Registration, login, and logout handlers.

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::info;

use super::templates::LoginTemplate;
use super::uploads::save_upload;
use super::{current_identity, notice, render_template, PageError};
use crate::auth;
use crate::db::{self, NewDriver, NewOrganization, NewUser};
use crate::SharedState;

#[derive(Deserialize)]
pub struct RegisterForm {
    fullname: String,
    email: String,
    password: String,
    phone: String,
    city: String,
}

pub async fn register_user(
    State(state): State<SharedState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, PageError> {
    if form.fullname.is_empty() || form.email.is_empty() || form.password.is_empty() {
        return Ok(notice("All fields are required.", "/registration"));
    }

    let user = NewUser {
        fullname: form.fullname,
        email: form.email,
        password_hash: auth::hash_password(&form.password)?,
        phone: form.phone,
        city: form.city,
    };
    db::users::insert(&state.db, &user).await?;

    info!(email = %user.email, "registered rider account");
    Ok(notice("Registration Successful! Redirecting...", "/login"))
}

/// Accumulated fields of the multipart driver registration form. The file
/// field `driver_license` is optional; every other field arrives as text.
#[derive(Default)]
struct DriverRegisterFields {
    fullname: String,
    email: String,
    password: String,
    phone: String,
    city: String,
    org_type: String,
    organization_id: Option<i64>,
    license: Option<(String, Vec<u8>)>,
}

pub async fn register_driver(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Response, PageError> {
    let mut fields = DriverRegisterFields::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "driver_license" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                if !filename.is_empty() && !data.is_empty() {
                    fields.license = Some((filename, data.to_vec()));
                }
            }
            "fullname" => fields.fullname = field.text().await?,
            "email" => fields.email = field.text().await?,
            "password" => fields.password = field.text().await?,
            "phone" => fields.phone = field.text().await?,
            "city" => fields.city = field.text().await?,
            "orgOpt" => fields.org_type = field.text().await?,
            "orgId" => {
                let raw = field.text().await?;
                fields.organization_id = raw.trim().parse().ok();
            }
            _ => {}
        }
    }

    if fields.fullname.is_empty() || fields.email.is_empty() || fields.password.is_empty() {
        return Ok(notice("All fields are required.", "/driver-registration"));
    }

    let license_file = match fields.license {
        Some((filename, data)) => {
            let uploads_dir = state.config.server.data_dir.join("uploads");
            Some(save_upload(&uploads_dir, &filename, &data).await?)
        }
        None => None,
    };

    let driver = NewDriver {
        fullname: fields.fullname,
        email: fields.email,
        password_hash: auth::hash_password(&fields.password)?,
        phone: fields.phone,
        city: fields.city,
        org_type: if fields.org_type.is_empty() {
            "Independent".to_string()
        } else {
            fields.org_type
        },
        organization_id: fields.organization_id,
        license_file,
    };
    db::drivers::insert(&state.db, &driver).await?;

    info!(email = %driver.email, "registered driver account");
    Ok(notice("Driver registration successful!", "/login"))
}

#[derive(Deserialize)]
pub struct OrganizationRegisterForm {
    #[serde(rename = "companyName")]
    company_name: String,
    #[serde(rename = "regNumber")]
    reg_number: String,
    email: String,
    phone: String,
    password: String,
}

pub async fn register_organization(
    State(state): State<SharedState>,
    Form(form): Form<OrganizationRegisterForm>,
) -> Result<Response, PageError> {
    if form.company_name.is_empty() || form.email.is_empty() || form.password.is_empty() {
        return Ok(notice("All fields are required.", "/organization-registration"));
    }

    let org = NewOrganization {
        company_name: form.company_name,
        reg_number: form.reg_number,
        email: form.email,
        password_hash: auth::hash_password(&form.password)?,
        phone: form.phone,
    };
    db::organizations::insert(&state.db, &org).await?;

    info!(email = %org.email, "registered organization account");
    Ok(notice("Organization registered successfully!", "/login"))
}

pub async fn login_page(State(state): State<SharedState>, jar: CookieJar) -> Response {
    if current_identity(&state, &jar).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    render_template(LoginTemplate)
}

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

pub async fn login_submit(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let identity = match auth::authenticate(&state.db, &form.email, &form.password).await? {
        Some(identity) => identity,
        // Unknown email and wrong password look identical to the client.
        None => return Ok(notice("Invalid credentials!", "/login")),
    };

    info!(id = identity.id, role = %identity.role, "login");
    let token = state.sessions.login(identity);

    let jar = jar.add(
        Cookie::build((state.config.session.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    );
    Ok((jar, Redirect::to("/dashboard")).into_response())
}

pub async fn logout(State(state): State<SharedState>, jar: CookieJar) -> Response {
    let cookie_name = state.config.session.cookie_name.clone();
    if let Some(cookie) = jar.get(&cookie_name) {
        state.sessions.destroy(cookie.value());
    }
    let jar = jar.remove(Cookie::new(cookie_name, ""));
    (jar, Redirect::to("/login")).into_response()
}
