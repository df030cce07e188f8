//! HTTP routes.

mod health;
mod patient;
mod staff;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use surrealdb::Connection;
use tower_http::trace::TraceLayer;

use crate::middleware::require_staff;
use crate::state::AppState;

/// Build the application router.
///
/// Only `/patient/*` routes sit behind the authenticator.
pub fn router<C: Connection>(state: AppState<C>) -> Router {
    let protected = Router::new()
        .route("/patient/search", get(patient::search::<C>))
        .route_layer(from_fn_with_state(state.clone(), require_staff::<C>));

    Router::new()
        .route("/ping", get(health::ping))
        .route("/staff/create", post(staff::create::<C>))
        .route("/staff/login", post(staff::login::<C>))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
