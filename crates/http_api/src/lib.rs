mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};

pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/rollup", post(handlers::rollup))
        .route("/rollup_csv", post(handlers::rollup_csv))
        .route("/summary", post(handlers::summary))
        .route("/detections", post(handlers::detections))
        .route("/detections_record", post(handlers::detections_record))
        .route("/stations", post(handlers::stations))
        .route("/stations_clear_data", post(handlers::stations_clear_data))
        .route("/impact_factors_list", post(handlers::impact_factors_list))
        .route(
            "/impact_factors_replace",
            post(handlers::impact_factors_replace),
        )
        .route("/settings_get", post(handlers::settings_get))
        .route("/settings_put", post(handlers::settings_put));

    Router::new()
        .nest("/api", api)
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

#[cfg(test)]
mod tests;
