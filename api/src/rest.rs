use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{handlers, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/users/:id", get(handlers::users::get_user_details))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
