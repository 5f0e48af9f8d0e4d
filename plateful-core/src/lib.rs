//! Plateful Order Engine
//!
//! Platform-agnostic order composition and pricing for a single food details
//! screen: add-on quantities, base quantity, the derived total, the favorite
//! flag and order submission. Rendering, HTTP and navigation live in the
//! host; this crate only sees them through the traits in [`remote`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod extras;
pub mod favorite;
pub mod format;
pub mod ids;
pub mod money;
pub mod order;
pub mod pricing;
pub mod quantity;
pub mod remote;
pub mod screen;

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

// Re-export commonly used types
pub use catalog::{CatalogError, CatalogFood, ExtraLine, Item};
pub use config::{ConfigError, OrderConfig};
pub use error::{OrderError, RemoteOp};
pub use extras::ExtraRegistry;
pub use favorite::{
    FavoriteFailurePolicy, FavoriteIcon, FavoriteRecord, FavoriteSync, FavoriteTicket,
    FavoriteToggle,
};
pub use format::{CurrencyFormatter, CurrencyStyle};
pub use ids::{RecordId, RecordIdGenerator, SequentialIds, UuidGenerator};
pub use money::{MoneyError, decimal_to_minor, minor_to_decimal};
pub use order::{OrderDraft, OrderPayload};
pub use pricing::{compute_total, extras_subtotal, unit_price};
pub use quantity::{QuantityController, QuantityRule};
pub use remote::{CatalogSource, FavoritesStore, HeaderAction, Navigator, OrdersStore};
pub use screen::OrderScreen;

use screen::{ScreenContext, guarded};

/// Opens order screens against one backend with one configuration.
pub struct OrderEngine<B>
where
    B: CatalogSource + FavoritesStore + OrdersStore,
{
    backend: Arc<B>,
    config: OrderConfig,
    ids: Arc<dyn RecordIdGenerator>,
    formatter: Arc<dyn CurrencyFormatter>,
}

impl<B> OrderEngine<B>
where
    B: CatalogSource + FavoritesStore + OrdersStore,
{
    /// Create an engine using UUID record ids and the configured currency style.
    pub fn new(backend: B, config: OrderConfig) -> Self {
        let formatter = Arc::new(config.currency.clone());
        Self {
            backend: Arc::new(backend),
            config,
            ids: Arc::new(UuidGenerator),
            formatter,
        }
    }

    #[must_use]
    pub fn with_id_generator(mut self, ids: impl RecordIdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl CurrencyFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    pub const fn config(&self) -> &OrderConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn formatter(&self) -> &dyn CurrencyFormatter {
        self.formatter.as_ref()
    }

    /// Load `food_id` and open a screen for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fetch fails, times out, or returns
    /// an item that cannot seed a screen.
    pub async fn open_screen<N: Navigator>(
        &self,
        food_id: u64,
        navigator: N,
    ) -> Result<OrderScreen<B, N>, OrderError> {
        self.open_screen_with(food_id, navigator, CancellationToken::new())
            .await
    }

    /// Like [`Self::open_screen`], with a caller-owned cancellation token.
    ///
    /// The token becomes the screen's lifecycle scope: cancelling it aborts
    /// the load and any later favorite or submit call.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Cancelled`] if the token fires before the load completes.
    pub async fn open_screen_with<N: Navigator>(
        &self,
        food_id: u64,
        navigator: N,
        cancel: CancellationToken,
    ) -> Result<OrderScreen<B, N>, OrderError> {
        log::info!("loading food {food_id}");
        let food = guarded(
            RemoteOp::Load,
            &cancel,
            self.config.request_timeout(),
            self.backend.fetch_food(food_id),
        )
        .await?;

        let (item, extras) = food.seed(self.formatter.as_ref(), self.config.extra_rule())?;
        log::debug!(
            "food {} loaded with {} extras at {}",
            item.id,
            extras.len(),
            item.formatted_price
        );

        let context = ScreenContext {
            backend: Arc::clone(&self.backend),
            ids: Arc::clone(&self.ids),
            formatter: Arc::clone(&self.formatter),
            quantity: QuantityController::new(self.config.food_rule()),
            favorite: FavoriteToggle::new(self.config.favorite_failure),
            timeout: self.config.request_timeout(),
            cancel,
        };
        Ok(OrderScreen::open(context, navigator, item, extras))
    }
}
