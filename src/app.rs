use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full HTTP surface
pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        // Public
        .merge(public_routes())
        // Protected (JWT required)
        .merge(post_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .route("/posts", get(public::post::get_posts))
        .route("/ingredients", get(public::ingredient::search))
        .route("/ingredient/:name", get(public::ingredient::find_by_name))
}

fn post_routes(state: AppState) -> Router<AppState> {
    use protected::post as board;

    Router::new()
        .route("/post", post(board::save))
        // Static segments win over :post_idx
        .route("/post/findMyPosts", get(board::find_my_posts))
        .route("/post/findMyLikes", get(board::find_my_likes))
        .route(
            "/post/:post_idx",
            get(board::find_by_post_idx)
                .patch(board::update)
                .delete(board::delete),
        )
        .route("/post/:post_idx/like", post(board::like).delete(board::unlike))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let security = &config.security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
