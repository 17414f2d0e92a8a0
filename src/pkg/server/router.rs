use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::handlers::probes::{health, healthz, livez};
use super::middlewares::authn;
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/jobs", post(handlers::jobs::create))
        .route(
            "/jobs/:id",
            put(handlers::jobs::update).delete(handlers::jobs::delete),
        )
        .route("/jobs/:id/publish", post(handlers::jobs::publish))
        .route("/jobs/:id/unpublish", post(handlers::jobs::unpublish))
        .route("/jobs/:id/applications", get(handlers::jobs::applications))
        .route("/applications", post(handlers::applications::create))
        .route("/applications/check/:job_id", get(handlers::applications::check))
        .route("/dashboard", get(handlers::dashboard::show))
        .route("/me", get(handlers::users::me).post(handlers::users::setup))
        .route("/board/jobs/:id", get(handlers::ui::job))
        .route("/board/jobs/:id/apply", get(handlers::ui::apply))
        .route("/board/new", get(handlers::ui::new_job))
        .route("/board/setup", get(handlers::ui::setup))
        .route("/board/dashboard", get(handlers::ui::dashboard))
        .route_layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/jobs", get(handlers::jobs::list))
        .route("/jobs/:id", get(handlers::jobs::retrieve))
        .route("/users/:id", get(handlers::users::profile))
        .route("/board", get(handlers::ui::index))
        .route("/board/companies/:id", get(handlers::ui::company))
        .route("/", get(health))
        .route("/health", get(health))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez));

    if state.dev_utils {
        tracing::warn!("dev utilities enabled at /utils/clean");
        app = app.route("/utils/clean", post(handlers::utils::clean));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
