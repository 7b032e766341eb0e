use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/options", get(handlers::get_options))
        .route("/api/session", get(handlers::get_session))
        .route("/api/checkin", post(handlers::checkin))
        .route("/api/keys", post(handlers::set_keys))
        .route("/api/tarot/draw", post(handlers::draw_tarot))
        .route("/api/tarot/reset", post(handlers::reset_tarot))
        .route("/api/report", post(handlers::report))
        .with_state(state)
}
