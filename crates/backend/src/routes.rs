use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// All application routes.
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // INGREDIENT ROUTES (operate on the owning recipe aggregate)
        // ========================================
        .route(
            "/recipe/:recipe_id/ingredients",
            get(handlers::ingredient::list),
        )
        .route(
            "/recipe/:recipe_id/ingredient",
            post(handlers::ingredient::save_or_update),
        )
        .route(
            "/recipe/:recipe_id/ingredient/new",
            get(handlers::ingredient::new_form),
        )
        .route(
            "/recipe/:recipe_id/ingredient/:id/show",
            get(handlers::ingredient::show),
        )
        .route(
            "/recipe/:recipe_id/ingredient/:id/update",
            get(handlers::ingredient::update_form),
        )
        .route(
            "/recipe/:recipe_id/ingredient/:id/delete",
            get(handlers::ingredient::delete),
        )
}
