//! Cart route handlers.
//!
//! The cart is persisted durably through the JSON store and written through
//! on every mutation. Checkout is simulated: it produces an order summary
//! and empties the cart, nothing more.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use scuderia_core::types::CarId;
use scuderia_core::{Cart, CartLine, keys};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    /// Sum of `price * quantity` in whole euros.
    pub total: u64,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub car_id: i64,
}

/// Simulated order confirmation.
#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub order_id: Uuid,
    pub lines: Vec<CartLine>,
    pub total: u64,
    pub placed_at: DateTime<Utc>,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart().read().await;
    Json(CartView::from(&*cart))
}

/// Add a car to the cart.
///
/// A second add of the same car increments its line quantity instead of
/// creating a duplicate line. The line snapshots title, price, and primary
/// image at add time.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let id = CarId::new(request.car_id);
    let car = state
        .cars()
        .read()
        .await
        .get(id)
        .filter(|car| car.is_visible())
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("car {id}")))?;

    let mut cart = state.cart().write().await;
    cart.add(&car);
    state.storage().save(keys::CART, &*cart)?;

    Ok(Json(CartView::from(&*cart)))
}

/// Remove a line from the cart (the whole line, not one unit).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CartView>> {
    let mut cart = state.cart().write().await;
    if cart.remove(CarId::new(id)) {
        state.storage().save(keys::CART, &*cart)?;
    }

    Ok(Json(CartView::from(&*cart)))
}

/// Empty the cart.
///
/// The confirmation dialog lives at the UI boundary; this operation is
/// unconditional.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartView>> {
    let mut cart = state.cart().write().await;
    cart.clear();
    state.storage().save(keys::CART, &*cart)?;

    Ok(Json(CartView::from(&*cart)))
}

/// Simulated checkout: reject an empty cart, otherwise return an order
/// summary and empty the cart.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Json<OrderSummary>> {
    let mut cart = state.cart().write().await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let summary = OrderSummary {
        order_id: Uuid::new_v4(),
        lines: cart.lines().to_vec(),
        total: cart.total(),
        placed_at: Utc::now(),
    };

    // Persist the emptied cart before committing it to memory.
    let cleared = Cart::default();
    state.storage().save(keys::CART, &cleared)?;
    *cart = cleared;

    tracing::info!(order_id = %summary.order_id, total = summary.total, "order placed");
    Ok(Json(summary))
}
