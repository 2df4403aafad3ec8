use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use handlebars::{Handlebars, RenderError, TemplateError};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::config::AppConfig;
use crate::downloader;
use crate::loader::DataCache;
use crate::pages::add::AddForm;
use crate::pages::search::filter_records;
use crate::pages::statistics::{self, Statistics};
use crate::record::AlumniRecord;
use crate::router::{self, Action, Screen, View};
use crate::session::{SESSION_COOKIE, SessionStore};
use crate::state::{Filters, Page, SessionState};

pub struct AppState {
    config: AppConfig,
    cache: Mutex<DataCache>,
    sessions: Mutex<SessionStore>,
    templates: Handlebars<'static>,
}

#[derive(Deserialize)]
struct SelectForm {
    #[serde(default)]
    name: String,
}

#[derive(Serialize)]
struct NavLink {
    href: String,
    label: &'static str,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, TemplateError> {
        let mut templates = Handlebars::new();
        templates.register_template_string("layout", include_str!("./static/layout.html"))?;
        templates.register_template_string("welcome", include_str!("./static/welcome.html"))?;
        templates.register_template_string("search", include_str!("./static/search.html"))?;
        templates.register_template_string("detail", include_str!("./static/detail.html"))?;
        templates
            .register_template_string("statistics", include_str!("./static/statistics.html"))?;
        templates.register_template_string("add", include_str!("./static/add.html"))?;

        let sessions = SessionStore::new(config.session_ttl);
        Ok(AppState {
            config,
            cache: Mutex::new(DataCache::new()),
            sessions: Mutex::new(sessions),
            templates,
        })
    }

    /// Run `f` against the caller's session, starting one if needed.
    /// Returns the session id alongside `f`'s result.
    fn with_session<R>(
        &self,
        jar: &CookieJar,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> (String, R) {
        let cookie = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

        // Build a new session's state before taking the session lock so a cold
        // load does not hold up other sessions.
        let known = cookie
            .as_deref()
            .is_some_and(|id| lock(&self.sessions).get(id).is_some());
        let mut fresh = (!known).then(|| self.initial_state());

        let mut sessions = lock(&self.sessions);
        let (id, session) = sessions.resolve(cookie.as_deref(), || {
            fresh.take().unwrap_or_else(|| self.initial_state())
        });
        let result = f(session);
        (id, result)
    }

    /// Run `f` against the caller's session without starting or extending
    /// one. Callers without a live session see the freshly loaded records.
    fn read_session<R>(&self, jar: &CookieJar, f: impl FnOnce(&SessionState) -> R) -> R {
        let cookie = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
        {
            let sessions = lock(&self.sessions);
            if let Some(state) = cookie.as_deref().and_then(|id| sessions.get(id)) {
                return f(state);
            }
        }
        f(&self.initial_state())
    }

    fn initial_state(&self) -> SessionState {
        let mut cache = lock(&self.cache);
        let outcome = cache.get_or_load(&self.config.data_path, &self.config.sheet_name);
        SessionState::from_outcome(outcome)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.bind_addr;
    let app_state = Arc::new(AppState::new(config)?);
    let app = build_router(app_state);

    // Start server
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(show_page))
        .route("/navigate/:page", post(navigate))
        .route("/search", post(set_filters))
        .route("/search/clear", post(clear_filters))
        .route("/search/select", post(select_record))
        .route("/add", post(submit_record))
        .route("/export/csv", get(export_csv))
        .route("/export/xlsx", get(export_xlsx))
        .route("/api/records", get(api_records))
        .route("/api/statistics", get(api_statistics))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(app_state)
}

fn session_jar(jar: CookieJar, id: String) -> CookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, id))
            .path("/")
            .http_only(true),
    )
}

async fn show_page(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let (id, screen) = state.with_session(&jar, router::render);

    match render_screen(&state.templates, &screen) {
        Ok(html) => (session_jar(jar, id), Html(html)).into_response(),
        Err(e) => {
            error!("failed to render {}: {}", screen.page, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Render error").into_response()
        }
    }
}

// One interaction: apply the action, then redirect so the browser re-renders.
fn perform(state: &AppState, jar: CookieJar, action: Action) -> (CookieJar, Redirect) {
    let (id, _) = state.with_session(&jar, |session| router::dispatch(session, action));
    (session_jar(jar, id), Redirect::to("/"))
}

async fn navigate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(page): Path<String>,
) -> Response {
    match page.parse::<Page>() {
        Ok(target) => perform(&state, jar, Action::Navigate(target)).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e).into_response(),
    }
}

async fn set_filters(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(filters): Form<Filters>,
) -> impl IntoResponse {
    perform(&state, jar, Action::SetFilters(filters))
}

async fn clear_filters(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    perform(&state, jar, Action::ClearFilters)
}

async fn select_record(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SelectForm>,
) -> impl IntoResponse {
    perform(&state, jar, Action::Select(form.name))
}

async fn submit_record(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<AddForm>,
) -> impl IntoResponse {
    perform(&state, jar, Action::Submit(form))
}

fn filtered(session: &SessionState) -> Vec<AlumniRecord> {
    filter_records(&session.records, &session.filters)
        .into_iter()
        .cloned()
        .collect()
}

async fn export_csv(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let records = state.read_session(&jar, filtered);
    let rows: Vec<&AlumniRecord> = records.iter().collect();

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"alumni.csv\""),
        ],
        downloader::to_csv(&rows),
    )
        .into_response()
}

async fn export_xlsx(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let records = state.read_session(&jar, filtered);
    let rows: Vec<&AlumniRecord> = records.iter().collect();

    match downloader::to_xlsx(&rows) {
        Ok(buffer) => (
            [
                (
                    header::CONTENT_TYPE,
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                ),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"alumni.xlsx\""),
            ],
            buffer,
        )
            .into_response(),
        Err(e) => {
            error!("xlsx export failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn api_records(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    Json(state.read_session(&jar, filtered))
}

async fn api_statistics(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let stats: Statistics = state.read_session(&jar, |session| statistics::compute(&session.records));
    Json(stats)
}

/// Render a screen into a full HTML page: the page body inside the layout.
fn render_screen(templates: &Handlebars<'static>, screen: &Screen) -> Result<String, RenderError> {
    let body = match &screen.view {
        View::Welcome(view) => templates.render("welcome", view)?,
        View::Search(view) => templates.render("search", view)?,
        View::Detail(view) => templates.render("detail", view)?,
        View::Statistics(view) => templates.render("statistics", view)?,
        View::Add(view) => templates.render("add", view)?,
    };

    let nav: Vec<NavLink> = screen
        .links
        .iter()
        .map(|page| NavLink {
            href: format!("/navigate/{}", page),
            label: page.title(),
        })
        .collect();

    templates.render(
        "layout",
        &serde_json::json!({
            "title": screen.page.title(),
            "show_nav": screen.page != Page::Welcome,
            "nav": nav,
            "notices": screen.notices,
            "body": body,
        }),
    )
}
