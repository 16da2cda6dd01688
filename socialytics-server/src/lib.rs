// Library exports for socialytics-server
// The CLI and the integration tests share the store and router through here

pub mod api;
pub mod config;
pub mod db;
pub mod state;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/overview", get(api::overview::get_overview))
        // Analytics catalog
        .route("/analytics/top-influencers", get(api::analytics::top_influencers))
        .route("/analytics/most-active", get(api::analytics::most_active_users))
        .route("/analytics/trending-posts", get(api::analytics::trending_posts))
        // User routes
        .route("/users", get(api::users::list_users).post(api::users::create_user))
        .route(
            "/users/:id",
            get(api::users::get_user)
                .put(api::users::update_user)
                .delete(api::users::delete_user),
        )
        .route("/users/:id/followers", get(api::users::get_followers))
        .route("/users/:id/following", get(api::users::get_following))
        // Post routes
        .route("/posts", get(api::posts::get_posts).post(api::posts::create_post))
        .route(
            "/posts/:id",
            get(api::posts::get_post)
                .put(api::posts::update_post)
                .delete(api::posts::delete_post),
        )
        .route(
            "/posts/:id/comments",
            get(api::posts::get_comments).post(api::posts::create_comment),
        )
        // Relationship routes
        .route("/relationships", post(api::relationships::follow))
        .route(
            "/relationships/:follower_id/:following_id",
            delete(api::relationships::unfollow),
        )
        // Performance routes
        .route("/performance/indexes", post(api::performance::create_indexes))
        .route("/performance/benchmark", get(api::performance::benchmark))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

async fn health_check() -> &'static str {
    "OK"
}
