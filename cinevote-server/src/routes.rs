use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use cinevote_config::CorsConfig;
use cinevote_model::api_routes;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::auth::auth_middleware;
use crate::handlers::{
    health::health_handler,
    movies::{list_movies_handler, vote_handler},
    users::{login_handler, refresh_handler, register_handler},
};
use crate::infra::app_state::AppState;

/// Builds the complete application router.
pub fn create_app(state: AppState) -> Router {
    let public = Router::new()
        .route(api_routes::HEALTH, get(health_handler))
        .route(api_routes::users::REGISTER, post(register_handler))
        .route(api_routes::users::TOKEN, post(login_handler))
        .route(api_routes::users::REFRESH, post(refresh_handler));

    let protected = Router::new()
        .route(api_routes::movies::LIST, get(list_movies_handler))
        .route(api_routes::movies::VOTE, post(vote_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors)),
        )
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            // Wildcards cannot be combined with credentialed requests.
            if origin == "*" {
                warn!("Ignoring wildcard CORS origin");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "Ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
