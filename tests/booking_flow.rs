//! End-to-end tests against the full router with a temporary database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use rentdrive::config::Config;
use rentdrive::{AppState, DbPool};

async fn setup() -> (Router, DbPool, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let pool = rentdrive::db::init(dir.path()).await.unwrap();

    let mut config = Config::default();
    config.server.data_dir = dir.path().to_path_buf();

    let state = Arc::new(AppState::new(config, pool.clone()));
    (rentdrive::web::create_router(state), pool, dir)
}

async fn get(app: &Router, path: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, path: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The session cookie pair ("rd_session=<token>") from a login response.
fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn register_user(app: &Router, fullname: &str, email: &str, password: &str, city: &str) {
    let body = format!(
        "fullname={}&email={}&password={}&phone=1&city={}",
        fullname, email, password, city
    );
    let response = post_form(app, "/register", &body, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn register_org(app: &Router, company: &str, email: &str, password: &str) {
    let body = format!(
        "companyName={}&regNumber=RG1&email={}&phone=2&password={}",
        company, email, password
    );
    let response = post_form(app, "/org-register", &body, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let body = format!("email={}&password={}", email, password);
    let response = post_form(app, "/login", &body, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    session_cookie(&response)
}

#[tokio::test]
async fn protected_route_redirects_anonymous_to_login() {
    let (app, _pool, _dir) = setup().await;

    let response = get(&app, "/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn register_then_login_establishes_user_session() {
    let (app, _pool, _dir) = setup().await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    let cookie = login(&app, "a@x.com", "p1").await;

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Welcome, Alice"));
    assert!(html.contains("No bookings yet."));
}

#[tokio::test]
async fn wrong_password_shows_alert_without_session() {
    let (app, _pool, _dir) = setup().await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    let response = post_form(&app, "/login", "email=a@x.com&password=wrong", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let html = body_text(response).await;
    assert!(html.contains("Invalid credentials!"));
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let (app, _pool, _dir) = setup().await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    let wrong_pass = body_text(post_form(&app, "/login", "email=a@x.com&password=no", None).await).await;
    let unknown = body_text(post_form(&app, "/login", "email=b@x.com&password=no", None).await).await;
    assert_eq!(wrong_pass, unknown);
}

#[tokio::test]
async fn logout_destroys_the_session() {
    let (app, _pool, _dir) = setup().await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    let cookie = login(&app, "a@x.com", "p1").await;

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn booking_creates_scheduled_row_for_caller() {
    let (app, pool, _dir) = setup().await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    let cookie = login(&app, "a@x.com", "p1").await;

    let body = "pickup_address=A&drop_address=B&pickup_time=10:00&start_date=2026-09-01&end_date=2026-09-02";
    let response = post_form(&app, "/book", body, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (user_id, status, confirmed): (i64, String, bool) =
        sqlx::query_as("SELECT user_id, status, confirmed FROM bookings")
            .fetch_one(&pool)
            .await
            .unwrap();
    let alice_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = 'a@x.com'")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(user_id, alice_id);
    assert_eq!(status, "Scheduled");
    assert!(!confirmed);

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    let html = body_text(response).await;
    assert!(html.contains("Scheduled"));
}

#[tokio::test]
async fn booking_prefers_a_driver_in_the_riders_city() {
    let (app, pool, _dir) = setup().await;

    register_org(&app, "O1", "o1@x.com", "po").await;
    let org_cookie = login(&app, "o1@x.com", "po").await;
    for (name, email, city) in [("Remote", "d1@x.com", "Yonder"), ("Local", "d2@x.com", "X")] {
        let body = format!(
            "fullname={}&email={}&phone=3&city={}&password=pd",
            name, email, city
        );
        post_form(&app, "/org/add-driver", &body, Some(&org_cookie)).await;
    }

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    let cookie = login(&app, "a@x.com", "p1").await;
    let body = "pickup_address=A&drop_address=B&pickup_time=10:00&start_date=2026-09-01&end_date=2026-09-02";
    post_form(&app, "/book", body, Some(&cookie)).await;

    let driver_id: Option<i64> = sqlx::query_scalar("SELECT driver_id FROM bookings")
        .fetch_one(&pool)
        .await
        .unwrap();
    let local_id: i64 = sqlx::query_scalar("SELECT id FROM drivers WHERE email = 'd2@x.com'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(driver_id, Some(local_id));
}

#[tokio::test]
async fn cancel_by_non_owner_is_a_no_op() {
    let (app, pool, _dir) = setup().await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    register_user(&app, "Mallory", "m@x.com", "p2", "Y").await;
    let alice = login(&app, "a@x.com", "p1").await;
    let mallory = login(&app, "m@x.com", "p2").await;

    let body = "pickup_address=A&drop_address=B&pickup_time=10:00&start_date=2026-09-01&end_date=2026-09-02";
    post_form(&app, "/book", body, Some(&alice)).await;
    let booking_id: i64 = sqlx::query_scalar("SELECT id FROM bookings")
        .fetch_one(&pool)
        .await
        .unwrap();

    post_form(
        &app,
        "/cancel-ride",
        &format!("booking_id={}", booking_id),
        Some(&mallory),
    )
    .await;
    let status: String = sqlx::query_scalar("SELECT status FROM bookings WHERE id = ?")
        .bind(booking_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, "Scheduled");

    // The owner can cancel
    post_form(
        &app,
        "/cancel-ride",
        &format!("booking_id={}", booking_id),
        Some(&alice),
    )
    .await;
    let (status, confirmed): (String, bool) =
        sqlx::query_as("SELECT status, confirmed FROM bookings WHERE id = ?")
            .bind(booking_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "Cancelled");
    assert!(!confirmed);
}

#[tokio::test]
async fn confirm_claims_the_booking_for_any_authenticated_caller() {
    let (app, pool, _dir) = setup().await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    register_user(&app, "Bob", "b@x.com", "p2", "Y").await;
    let alice = login(&app, "a@x.com", "p1").await;
    let bob = login(&app, "b@x.com", "p2").await;

    let body = "pickup_address=A&drop_address=B&pickup_time=10:00&start_date=2026-09-01&end_date=2026-09-02";
    post_form(&app, "/book", body, Some(&alice)).await;
    let booking_id: i64 = sqlx::query_scalar("SELECT id FROM bookings")
        .fetch_one(&pool)
        .await
        .unwrap();

    // Bob is not the assigned driver, yet the confirm succeeds and claims
    // the ride for him. Documented platform behavior.
    post_form(
        &app,
        "/confirm-ride",
        &format!("booking_id={}", booking_id),
        Some(&bob),
    )
    .await;

    let (status, confirmed, driver_id): (String, bool, Option<i64>) =
        sqlx::query_as("SELECT status, confirmed, driver_id FROM bookings WHERE id = ?")
            .bind(booking_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let bob_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = 'b@x.com'")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(status, "Confirmed");
    assert!(confirmed);
    assert_eq!(driver_id, Some(bob_id));
}

#[tokio::test]
async fn only_riders_can_book() {
    let (app, pool, _dir) = setup().await;

    register_org(&app, "O1", "o1@x.com", "po").await;
    let org_cookie = login(&app, "o1@x.com", "po").await;

    let body = "pickup_address=A&drop_address=B&pickup_time=10:00&start_date=2026-09-01&end_date=2026-09-02";
    let response = post_form(&app, "/book", body, Some(&org_cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Only rider accounts"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn organizations_cannot_touch_each_others_drivers() {
    let (app, pool, _dir) = setup().await;

    register_org(&app, "O1", "o1@x.com", "po").await;
    register_org(&app, "O2", "o2@x.com", "po").await;
    let o1 = login(&app, "o1@x.com", "po").await;
    let o2 = login(&app, "o2@x.com", "po").await;

    post_form(
        &app,
        "/org/add-driver",
        "fullname=Dan&email=d@x.com&phone=3&city=X&password=pd",
        Some(&o2),
    )
    .await;
    let driver_id: i64 = sqlx::query_scalar("SELECT id FROM drivers WHERE email = 'd@x.com'")
        .fetch_one(&pool)
        .await
        .unwrap();

    // O1 attempts to delete and update O2's driver
    post_form(
        &app,
        "/org/delete-driver",
        &format!("id={}", driver_id),
        Some(&o1),
    )
    .await;
    post_form(
        &app,
        "/org/update-driver",
        &format!("id={}&fullname=Evil&email=e@x.com&phone=9&city=Z", driver_id),
        Some(&o1),
    )
    .await;

    let fullname: Option<String> =
        sqlx::query_scalar("SELECT fullname FROM drivers WHERE id = ?")
            .bind(driver_id)
            .fetch_optional(&pool)
            .await
            .unwrap();
    assert_eq!(fullname.as_deref(), Some("Dan"));
}

#[tokio::test]
async fn deleting_a_driver_detaches_their_bookings() {
    let (app, pool, _dir) = setup().await;

    register_org(&app, "O1", "o1@x.com", "po").await;
    let org_cookie = login(&app, "o1@x.com", "po").await;
    post_form(
        &app,
        "/org/add-driver",
        "fullname=Dan&email=d@x.com&phone=3&city=X&password=pd",
        Some(&org_cookie),
    )
    .await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    let cookie = login(&app, "a@x.com", "p1").await;
    let body = "pickup_address=A&drop_address=B&pickup_time=10:00&start_date=2026-09-01&end_date=2026-09-02";
    post_form(&app, "/book", body, Some(&cookie)).await;

    let driver_id: i64 = sqlx::query_scalar("SELECT id FROM drivers WHERE email = 'd@x.com'")
        .fetch_one(&pool)
        .await
        .unwrap();
    post_form(
        &app,
        "/org/delete-driver",
        &format!("id={}", driver_id),
        Some(&org_cookie),
    )
    .await;

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drivers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let dangling: Option<i64> = sqlx::query_scalar("SELECT driver_id FROM bookings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(dangling, None);
}

#[tokio::test]
async fn driver_registration_with_license_stores_the_file() {
    let (app, pool, dir) = setup().await;

    let boundary = "test-boundary";
    let mut body = String::new();
    for (name, value) in [
        ("fullname", "Dan"),
        ("email", "d@x.com"),
        ("password", "pd"),
        ("phone", "3"),
        ("city", "X"),
        ("orgOpt", "Independent"),
        ("orgId", ""),
    ] {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            boundary, name, value
        ));
    }
    body.push_str(&format!(
        "--{}\r\nContent-Disposition: form-data; name=\"driver_license\"; filename=\"license scan.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\nfake pdf bytes\r\n--{}--\r\n",
        boundary, boundary
    ));

    let request = Request::builder()
        .method("POST")
        .uri("/driver-register")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let license_file: Option<String> =
        sqlx::query_scalar("SELECT license_file FROM drivers WHERE email = 'd@x.com'")
            .fetch_one(&pool)
            .await
            .unwrap();
    let license_file = license_file.expect("license path should be recorded");
    assert!(license_file.starts_with("/uploads/"));
    assert!(license_file.ends_with("license-scan.pdf"));

    let stored = dir
        .path()
        .join("uploads")
        .join(license_file.strip_prefix("/uploads/").unwrap());
    assert_eq!(std::fs::read(stored).unwrap(), b"fake pdf bytes");

    // And the new driver can log in
    login(&app, "d@x.com", "pd").await;
}

#[tokio::test]
async fn driver_dashboard_lists_assigned_rides() {
    let (app, _pool, _dir) = setup().await;

    register_org(&app, "O1", "o1@x.com", "po").await;
    let org_cookie = login(&app, "o1@x.com", "po").await;
    post_form(
        &app,
        "/org/add-driver",
        "fullname=Dan&email=d@x.com&phone=3&city=X&password=pd",
        Some(&org_cookie),
    )
    .await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    let cookie = login(&app, "a@x.com", "p1").await;
    let body = "pickup_address=A&drop_address=B&pickup_time=10:00&start_date=2026-09-01&end_date=2026-09-02";
    post_form(&app, "/book", body, Some(&cookie)).await;

    let driver_cookie = login(&app, "d@x.com", "pd").await;
    let response = get(&app, "/dashboard", Some(&driver_cookie)).await;
    let html = body_text(response).await;
    assert!(html.contains("Welcome, Dan"));
    assert!(html.contains("Alice"));
}

#[tokio::test]
async fn duplicate_email_registration_fails_with_server_error() {
    let (app, _pool, _dir) = setup().await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    let response = post_form(
        &app,
        "/register",
        "fullname=Alice2&email=a@x.com&password=p2&phone=1&city=X",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn login_page_redirects_when_already_authenticated() {
    let (app, _pool, _dir) = setup().await;

    register_user(&app, "Alice", "a@x.com", "p1", "X").await;
    let cookie = login(&app, "a@x.com", "p1").await;

    let response = get(&app, "/login", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");
}
