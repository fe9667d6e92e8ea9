use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mockito::{Matcher, Mock, Server};
use serde_json::json;
use skillwheel_client::shells::ShellRegistry;
use skillwheel_client::{web, ApiClient, Session};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const RESERVATIONS: &str = r#"{"status":200,"reservations":[{"id":5,"reservationTime":"9:15","reservationDate":"11.03.2025","reservationPlace":"Kwiatowa 11","isReserved":false}]}"#;
const INSTRUCTOR: &str = r#"{"status":200,"instructor":{"id":1,"name":"Jan","surname":"Kowalski","email":"jan@example.com","password":"password123","nameOfSchool":"Example School"}}"#;
const ANNA: &str = r#"{"name":"Anna","surname":"Nowak","email":"a@n.pl","password":"x","nameOfSchool":"LO1"}"#;

fn app(server: &Server) -> Router {
    app_at(&server.url())
}

fn app_at(base_url: &str) -> Router {
    let api = ApiClient::new(base_url, Duration::from_secs(5)).unwrap();
    let shells = Arc::new(ShellRegistry::new(api, Session::default()));
    web::router(shells, "static")
}

async fn list_mocks(server: &mut Server, hits: usize) -> (Mock, Mock) {
    let reservations = server
        .mock("GET", "/api/reservations/instructor/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RESERVATIONS)
        .expect(hits)
        .create_async()
        .await;
    let instructor = server
        .mock("GET", "/api/instructors/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(INSTRUCTOR)
        .expect(hits)
        .create_async()
        .await;
    (reservations, instructor)
}

struct Reply {
    status: StatusCode,
    cookie: Option<String>,
    location: Option<String>,
    body: String,
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let header_value = |name| {
        response
            .headers()
            .get(name)
            .and_then(|v: &header::HeaderValue| v.to_str().ok())
            .map(str::to_string)
    };
    let cookie = header_value(header::SET_COOKIE)
        .and_then(|c| c.split(';').next().map(str::to_string));
    let location = header_value(header::LOCATION);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    Reply {
        status,
        cookie,
        location,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(path: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
    let mut builder = Request::post(path).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

#[tokio::test]
async fn reserve_click_renders_reserved_without_api_call() {
    let mut server = Server::new_async().await;
    let (reservations, instructor) = list_mocks(&mut server, 1).await;
    let app = app(&server);

    let page = send(&app, get("/reservations", None)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("9:15 - 11.03.2025"));
    assert!(page.body.contains("Jan Kowalski"));
    assert!(page.body.contains("Kwiatowa 11"));
    assert!(page.body.contains(r#"action="/reservations/5/reserve""#));
    assert!(!page.body.contains("reserved-button"));

    let cookie = page.cookie.expect("shell cookie set");
    let clicked = send(
        &app,
        post_form("/reservations/5/reserve", Some(&cookie), ""),
    )
    .await;
    assert_eq!(clicked.status, StatusCode::OK);
    assert!(clicked.body.contains("reserved-button"));
    assert!(!clicked.body.contains(r#"action="/reservations/5/reserve""#));

    reservations.assert_async().await;
    instructor.assert_async().await;
}

#[tokio::test]
async fn reload_forgets_local_reservation() {
    let mut server = Server::new_async().await;
    let (reservations, _) = list_mocks(&mut server, 2).await;
    let app = app(&server);

    let page = send(&app, get("/", None)).await;
    let cookie = page.cookie.unwrap();
    send(&app, post_form("/reservations/5/reserve", Some(&cookie), "")).await;
    let reloaded = send(&app, get("/", Some(&cookie))).await;

    assert!(reloaded.body.contains(r#"action="/reservations/5/reserve""#));
    reservations.assert_async().await;
}

#[tokio::test]
async fn profile_loads_and_saves_edits() {
    let mut server = Server::new_async().await;
    let fetch = server
        .mock("GET", "/api/students/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ANNA)
        .expect(1)
        .create_async()
        .await;
    let save = server
        .mock("PUT", "/api/students/1")
        .match_body(Matcher::Json(json!({
            "name": "Anna",
            "surname": "Kowalska",
            "email": "a@n.pl",
            "password": "x",
            "nameOfSchool": "LO1"
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let app = app(&server);

    let page = send(&app, get("/profile", None)).await;
    assert!(page.body.contains(r#"value="Anna""#));
    assert!(page.body.contains(r#"value="Nowak""#));
    assert!(page.body.contains(r#"value="a@n.pl""#));
    assert!(page.body.contains(r#"value="x""#));
    assert!(page.body.contains(r#"value="LO1" disabled"#));

    let cookie = page.cookie.unwrap();
    // a school name in the form is ignored, the field is read-only
    let saved = send(
        &app,
        post_form(
            "/profile",
            Some(&cookie),
            "name=Anna&surname=Kowalska&email=a%40n.pl&password=x&nameOfSchool=Other",
        ),
    )
    .await;
    assert_eq!(saved.status, StatusCode::OK);
    assert!(saved.body.contains("Profile saved"));
    assert!(saved.body.contains(r#"value="Kowalska""#));

    fetch.assert_async().await;
    save.assert_async().await;
}

#[tokio::test]
async fn failed_profile_save_keeps_edits() {
    let mut server = Server::new_async().await;
    let _fetch = server
        .mock("GET", "/api/students/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ANNA)
        .create_async()
        .await;
    let _save = server
        .mock("PUT", "/api/students/1")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":400,"error":"Password must be at least 8 characters long"}"#)
        .create_async()
        .await;
    let app = app(&server);

    let page = send(&app, get("/profile", None)).await;
    let saved = send(
        &app,
        post_form(
            "/profile",
            page.cookie.as_deref(),
            "name=Anna&surname=Kowalska&email=a%40n.pl&password=x",
        ),
    )
    .await;

    assert!(saved.body.contains("notice-failure"));
    assert!(saved.body.contains("Password must be at least 8 characters long"));
    assert!(saved.body.contains(r#"value="Kowalska""#));
}

#[tokio::test]
async fn profile_that_failed_to_load_is_not_saved() {
    let mut server = Server::new_async().await;
    let _fetch = server
        .mock("GET", "/api/students/1")
        .with_status(500)
        .create_async()
        .await;
    let save = server
        .mock("PUT", "/api/students/1")
        .expect(0)
        .create_async()
        .await;
    let app = app(&server);

    let page = send(&app, get("/profile", None)).await;
    assert!(page.body.contains("Profile could not be loaded"));
    assert!(!page.body.contains("save-profile-button"));

    // a stale form posted anyway must not reach the API
    let saved = send(
        &app,
        post_form(
            "/profile",
            page.cookie.as_deref(),
            "name=Anna&surname=Kowalska&email=a%40n.pl&password=x",
        ),
    )
    .await;
    assert_eq!(saved.status, StatusCode::OK);
    assert!(saved.body.contains("notice-failure"));
    assert!(!saved.body.contains("Profile saved"));

    save.assert_async().await;
}

#[tokio::test]
async fn created_reservation_navigates_to_list_once() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/api/reservations")
        .match_body(Matcher::Json(json!({
            "isReserved": false,
            "studentID": 1,
            "instructorID": 1,
            "reservationDate": "2025-05-10",
            "reservationTime": "14:30",
            "reservationPlace": "Kwiatowa 11"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":9}"#)
        .expect(1)
        .create_async()
        .await;
    let (reservations, instructor) = list_mocks(&mut server, 1).await;
    let app = app(&server);

    let form = send(&app, get("/make-a-reservation", None)).await;
    assert!(form.body.contains(r#"type="date""#));
    let cookie = form.cookie.unwrap();

    let submitted = send(
        &app,
        post_form(
            "/make-a-reservation",
            Some(&cookie),
            "reservation-date=2025-05-10&meeting-time=14%3A30&meeting-place=Kwiatowa+11",
        ),
    )
    .await;
    assert_eq!(submitted.status, StatusCode::SEE_OTHER);
    assert_eq!(submitted.location.as_deref(), Some("/reservations"));

    let list = send(&app, get("/reservations", Some(&cookie))).await;
    assert!(list.body.contains("Reservation created"));
    assert!(list.body.contains("Kwiatowa 11"));

    create.assert_async().await;
    reservations.assert_async().await;
    instructor.assert_async().await;
}

#[tokio::test]
async fn rejected_reservation_stays_on_form() {
    let mut server = Server::new_async().await;
    let _create = server
        .mock("POST", "/api/reservations")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":422,"error":"Reservation date must be in the present or future"}"#)
        .create_async()
        .await;
    let (reservations, instructor) = list_mocks(&mut server, 0).await;
    let app = app(&server);

    let form = send(&app, get("/make-a-reservation", None)).await;
    let submitted = send(
        &app,
        post_form(
            "/make-a-reservation",
            form.cookie.as_deref(),
            "reservation-date=2000-01-01&meeting-time=10%3A00&meeting-place=D%C5%82uga+33",
        ),
    )
    .await;

    assert_eq!(submitted.status, StatusCode::OK);
    assert_eq!(submitted.location, None);
    assert!(submitted.body.contains("notice-failure"));
    assert!(submitted.body.contains(r#"value="2000-01-01""#));
    assert!(submitted.body.contains(r#"value="10:00""#));
    assert!(submitted.body.contains(r#"value="Długa 33" selected"#));

    reservations.assert_async().await;
    instructor.assert_async().await;
}

#[tokio::test]
async fn unreachable_api_keeps_reservation_form() {
    // nothing listens here
    let app = app_at("http://127.0.0.1:9");

    let form = send(&app, get("/make-a-reservation", None)).await;
    let submitted = send(
        &app,
        post_form(
            "/make-a-reservation",
            form.cookie.as_deref(),
            "reservation-date=2025-05-10&meeting-time=14%3A30&meeting-place=Kwiatowa+11",
        ),
    )
    .await;

    assert_eq!(submitted.status, StatusCode::OK);
    assert_eq!(submitted.location, None);
    assert!(submitted.body.contains("notice-failure"));
    assert!(submitted.body.contains("Could not create the reservation"));
    assert!(submitted.body.contains(r#"value="2025-05-10""#));
    assert!(submitted.body.contains(r#"value="14:30""#));
    assert!(submitted.body.contains(r#"value="Kwiatowa 11" selected"#));
}

#[tokio::test]
async fn failed_list_load_renders_empty_page() {
    let mut server = Server::new_async().await;
    let _reservations = server
        .mock("GET", "/api/reservations/instructor/1")
        .with_status(500)
        .create_async()
        .await;
    let _instructor = server
        .mock("GET", "/api/instructors/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(INSTRUCTOR)
        .create_async()
        .await;
    let app = app(&server);

    let page = send(&app, get("/reservations", None)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.body.contains("reservation-item"));
    assert!(!page.body.contains("notice"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let server = Server::new_async().await;
    let app = app(&server);
    let reply = send(&app, get("/admin", None)).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}
