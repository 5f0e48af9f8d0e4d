//! Collaborators the engine talks to but does not implement.
//!
//! Platform-specific crates provide these: an HTTP client for the three
//! stores, and whatever navigation stack hosts the screen.
use async_trait::async_trait;

use crate::catalog::CatalogFood;
use crate::favorite::{FavoriteIcon, FavoriteRecord};
use crate::order::OrderPayload;

/// Source of menu items (`GET /foods/{id}`).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch one item with its offered add-ons.
    ///
    /// # Errors
    ///
    /// Returns an error if the item cannot be fetched or decoded.
    async fn fetch_food(&self, food_id: u64) -> Result<CatalogFood, Self::Error>;
}

/// Remote favorites store (`POST /favorites`).
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a favorite record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not acknowledge the record.
    async fn add_favorite(&self, record: &FavoriteRecord) -> Result<(), Self::Error>;
}

/// Remote orders store (`POST /orders`).
#[async_trait]
pub trait OrdersStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not acknowledge the order.
    async fn place_order(&self, order: &OrderPayload) -> Result<(), Self::Error>;
}

/// Header button the host shows next to the title; pressing it toggles the favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderAction {
    pub icon: FavoriteIcon,
}

/// Navigation stack hosting the screen.
pub trait Navigator {
    /// Leave the screen.
    fn go_back(&mut self);

    /// Install or refresh the header action.
    fn set_header_action(&mut self, action: HeaderAction);
}
