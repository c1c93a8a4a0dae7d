//! HTTP route handlers for the showroom.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check
//!
//! # Catalog
//! GET    /cars                 - Active cars through the filter pipeline
//! GET    /cars/{slug}          - Car detail by slug
//! GET    /search?q=            - Free-text search
//!
//! # Cart
//! GET    /cart                 - Cart contents and total
//! POST   /cart/items           - Add a car (quantity accumulates)
//! DELETE /cart/items/{id}      - Remove a whole line
//! DELETE /cart                 - Empty the cart
//! POST   /cart/checkout        - Simulated checkout
//!
//! # Comparison (session-scoped, capped)
//! GET    /compare              - Current comparison list
//! POST   /compare/{id}         - Toggle a car
//!
//! # Favorites (durable)
//! GET    /favorites            - Current favorites
//! POST   /favorites/{id}       - Toggle a car
//! ```

pub mod cars;
pub mod cart;
pub mod compare;
pub mod favorites;
pub mod search;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", delete(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the showroom.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/cars", get(cars::index))
        .route("/cars/{slug}", get(cars::show))
        .route("/search", get(search::search))
        // Cart
        .nest("/cart", cart_routes())
        // Comparison
        .route("/compare", get(compare::show))
        .route("/compare/{id}", post(compare::toggle))
        // Favorites
        .route("/favorites", get(favorites::show))
        .route("/favorites/{id}", post(favorites::toggle))
}
