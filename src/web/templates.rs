// Askama template definitions

use askama::Template;

use crate::db::{BookingWithDriver, BookingWithRider, Driver, DriverSummary};

// Public pages

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub logged_in: bool,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

#[derive(Template)]
#[template(path = "car_list.html")]
pub struct CarListTemplate;

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate;

#[derive(Template)]
#[template(path = "registration.html")]
pub struct RegistrationTemplate;

#[derive(Template)]
#[template(path = "driver_registration.html")]
pub struct DriverRegistrationTemplate;

#[derive(Template)]
#[template(path = "organization_registration.html")]
pub struct OrganizationRegistrationTemplate;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate;

// Role-branched dashboards

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub name: String,
    pub bookings: Vec<BookingWithDriver>,
    pub drivers: Vec<DriverSummary>,
}

#[derive(Template)]
#[template(path = "dashboard_driver.html")]
pub struct DashboardDriverTemplate {
    pub name: String,
    pub rides: Vec<BookingWithRider>,
}

#[derive(Template)]
#[template(path = "dashboard_org.html")]
pub struct DashboardOrgTemplate {
    pub name: String,
    pub drivers: Vec<Driver>,
}
