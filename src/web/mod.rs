//! HTTP surface: router, access control gate, and page handlers.

mod account;
mod bookings;
mod dashboard;
mod error;
mod org;
mod pages;
mod templates;
mod uploads;

pub use error::PageError;
pub use templates::*;

use askama::Template;
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::session::Identity;
use crate::SharedState;

pub fn create_router(state: SharedState) -> Router {
    // Public pages and account creation
    let public_routes = Router::new()
        .route("/", get(|| async { Redirect::to("/index") }))
        .route("/index", get(pages::index))
        .route("/about", get(pages::about))
        .route("/car-list", get(pages::car_list))
        .route("/contact", get(pages::contact))
        .route("/contact-submit", post(pages::contact_submit))
        .route("/registration", get(pages::registration))
        .route("/driver-registration", get(pages::driver_registration))
        .route(
            "/organization-registration",
            get(pages::organization_registration),
        )
        .route("/register", post(account::register_user))
        .route("/driver-register", post(account::register_driver))
        .route("/org-register", post(account::register_organization))
        .route("/login", get(account::login_page))
        .route("/login", post(account::login_submit))
        .route("/logout", get(account::logout));

    // Everything behind the access gate
    let protected_routes = Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/book", post(bookings::book))
        .route("/confirm-ride", post(bookings::confirm_ride))
        .route("/cancel-ride", post(bookings::cancel_ride))
        .route("/org/add-driver", post(org::add_driver))
        .route("/org/update-driver", post(org::update_driver))
        .route("/org/delete-driver", post(org::delete_driver))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_login,
        ));

    let uploads_dir = state.config.server.data_dir.join("uploads");

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Access control gate: resolve the session cookie to an identity or bounce
/// the request to the login page. The identity is attached to the request
/// for downstream handlers.
async fn require_login(
    State(state): State<SharedState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match current_identity(&state, &jar) {
        Some(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Look up the caller's identity from the session cookie, if any.
pub(crate) fn current_identity(state: &crate::AppState, jar: &CookieJar) -> Option<Identity> {
    jar.get(state.config.session.cookie_name.as_str())
        .and_then(|cookie| state.sessions.current(cookie.value()))
}

/// Extractor handing the authenticated identity to a handler. Requests that
/// reach a protected handler already carry it from the gate; the cookie
/// fallback keeps the extractor usable on its own.
pub struct SessionUser(pub Identity);

#[async_trait]
impl FromRequestParts<SharedState> for SessionUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(SessionUser(identity.clone()));
        }
        let jar = CookieJar::from_headers(&parts.headers);
        current_identity(state, &jar)
            .map(SessionUser)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

// Helper to render templates and handle errors
pub(crate) fn render_template<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {}", e),
        )
            .into_response(),
    }
}

/// Inline acknowledgment page: alert, then client-side redirect. Messages
/// are static strings from this crate, never user input.
pub(crate) fn notice(message: &str, target: &str) -> Response {
    Html(format!(
        "<script>alert('{}'); window.location.href='{}';</script>",
        message, target
    ))
    .into_response()
}
