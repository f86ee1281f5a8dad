pub mod articles;
pub mod error;
pub mod extractors;
pub mod health;
pub mod locks;
pub mod scoring;
pub mod state;
pub mod voting;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use extractors::{ApiJson, ApiQuery};
pub use health::{health, init_server_start_time};
pub use locks::ArticleLocks;
pub use state::AppState;
pub use voting::cast_vote;

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/score-content", post(scoring::score_content))
        .route(
            "/api/posts",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/api/posts/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route("/api/posts/{id}/vote", post(voting::vote))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
