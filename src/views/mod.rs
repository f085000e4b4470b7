pub mod button;
pub mod form;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(form::show).post(form::post))
        // HTMX partials
        .route("/htmx/details", post(form::details_partial))
}
