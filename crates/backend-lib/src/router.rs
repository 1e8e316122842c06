// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP routes.
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, auth, users};
use crate::middleware::require_auth;
use crate::AppState;

/// Build the service router. Everything except `/login` and `/health`
/// requires a bearer token.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/password", put(auth::update_password))
        .route("/user", post(users::create_user))
        .route(
            "/user/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/user/login/{login}", get(users::find_user_by_login))
        .route("/user/email/{email}", get(users::find_user_by_email))
        .route("/users", get(users::get_users))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/login", post(auth::login))
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
