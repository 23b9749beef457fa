use crate::auth::require_token;
use crate::handlers;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/clients", get(handlers::list_clients).post(handlers::create_client))
        .route(
            "/clients/:id",
            get(handlers::get_client)
                .put(handlers::update_client)
                .delete(handlers::delete_client),
        )
        .route("/upcoming", get(handlers::get_upcoming))
        .route("/months", get(handlers::get_month_counts))
        .route("/months/:month", get(handlers::get_month_groups))
        .route("/search", get(handlers::search_clients))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api)
        .with_state(state)
}
