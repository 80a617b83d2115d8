//! Role-branched dashboard.

use axum::{extract::State, response::Response};

use super::templates::{DashboardDriverTemplate, DashboardOrgTemplate, DashboardTemplate};
use super::{render_template, PageError, SessionUser};
use crate::db;
use crate::session::Role;
use crate::SharedState;

pub async fn dashboard(
    State(state): State<SharedState>,
    SessionUser(identity): SessionUser,
) -> Result<Response, PageError> {
    match identity.role {
        Role::User => {
            let bookings = db::bookings::list_for_user(&state.db, identity.id).await?;
            let drivers = db::drivers::list_summaries(&state.db).await?;
            Ok(render_template(DashboardTemplate {
                name: identity.name,
                bookings,
                drivers,
            }))
        }
        Role::Driver => {
            let rides = db::bookings::list_for_driver(&state.db, identity.id).await?;
            Ok(render_template(DashboardDriverTemplate {
                name: identity.name,
                rides,
            }))
        }
        Role::Organization => {
            let drivers = db::drivers::list_for_organization(&state.db, identity.id).await?;
            Ok(render_template(DashboardOrgTemplate {
                name: identity.name,
                drivers,
            }))
        }
    }
}
