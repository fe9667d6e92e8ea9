use crate::model::ReservationId;
use crate::render;
use crate::routes::Route;
use crate::shell::Shell;
use crate::shells::{ShellRegistry, SHELL_COOKIE};
use crate::views::{make_reservation::ReservationForm, profile::ProfileForm, Msg};
use axum::{
    extract::{Form, Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use tower_http::services::ServeDir;
use tracing::{debug, error};

type Shells = Arc<ShellRegistry>;

/// Shell belonging to the browser, with the cookie that keeps it there
async fn open(shells: &ShellRegistry, cookies: CookieJar) -> (CookieJar, OwnedMutexGuard<Shell>) {
    let (id, shell) = shells
        .shell_for(cookies.get(SHELL_COOKIE).map(|c| c.value()))
        .await;
    let cookie = Cookie::build((SHELL_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (cookies.add(cookie), shell.lock_owned().await)
}

/// Make sure `route`'s page is mounted before an action is applied to it
async fn ensure_on(shell: &mut Shell, route: Route) {
    if !shell.is_on(route) {
        debug!("Action for {} while on {}, mounting it first", route, shell.route());
        shell.navigate(route).await;
    }
}

fn page(shell: &mut Shell) -> Response {
    match render::render(shell) {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Error rendering {}: {}", shell.route(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Rendering failed").into_response()
        }
    }
}

async fn show_page(
    State(shells): State<Shells>,
    cookies: CookieJar,
    uri: Uri,
) -> (CookieJar, Response) {
    let (cookies, mut shell) = open(&shells, cookies).await;
    let Some(route) = Route::from_path(uri.path()) else {
        return (cookies, not_found().await.into_response());
    };
    shell.visit(route).await;
    let response = page(&mut shell);
    (cookies, response)
}

async fn reserve(
    State(shells): State<Shells>,
    cookies: CookieJar,
    Path(id): Path<ReservationId>,
) -> (CookieJar, Response) {
    let (cookies, mut shell) = open(&shells, cookies).await;
    ensure_on(&mut shell, Route::Reservations).await;
    shell.dispatch(Msg::MarkReserved(id)).await;
    let response = page(&mut shell);
    (cookies, response)
}

async fn save_profile(
    State(shells): State<Shells>,
    cookies: CookieJar,
    Form(form): Form<ProfileForm>,
) -> (CookieJar, Response) {
    let (cookies, mut shell) = open(&shells, cookies).await;
    ensure_on(&mut shell, Route::Profile).await;
    shell.dispatch(Msg::EditProfile(form)).await;
    shell.dispatch(Msg::SaveProfile).await;
    let response = page(&mut shell);
    (cookies, response)
}

async fn submit_reservation(
    State(shells): State<Shells>,
    cookies: CookieJar,
    Form(form): Form<ReservationForm>,
) -> (CookieJar, Response) {
    let (cookies, mut shell) = open(&shells, cookies).await;
    ensure_on(&mut shell, Route::MakeAReservation).await;
    shell.dispatch(Msg::EditReservation(form)).await;
    let response = match shell.dispatch(Msg::SubmitReservation).await {
        Some(route) => Redirect::to(route.path()).into_response(),
        None => page(&mut shell),
    };
    (cookies, response)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Browser-facing routes; `static_dir` is served under `/static`
pub fn router(shells: Shells, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(show_page))
        .route("/reservations", get(show_page))
        .route("/reservations/:id/reserve", post(reserve))
        .route("/profile", get(show_page).post(save_profile))
        .route(
            "/make-a-reservation",
            get(show_page).post(submit_reservation),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(shells)
}
