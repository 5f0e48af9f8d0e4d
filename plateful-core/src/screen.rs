//! A single food details screen: the live order draft and its side effects.
//!
//! Quantity edits are synchronous and never suspend. The three remote calls
//! (load, favorite, submit) race the screen's cancellation token and the
//! optional request timeout.
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::catalog::{ExtraLine, Item};
use crate::error::{OrderError, RemoteOp};
use crate::extras::ExtraRegistry;
use crate::favorite::{FavoriteIcon, FavoriteRecord, FavoriteSync, FavoriteToggle};
use crate::format::CurrencyFormatter;
use crate::ids::RecordIdGenerator;
use crate::order::{OrderDraft, OrderPayload};
use crate::pricing::compute_total;
use crate::quantity::QuantityController;
use crate::remote::{FavoritesStore, HeaderAction, Navigator, OrdersStore};

/// Shared services handed from the engine to each screen it opens.
pub(crate) struct ScreenContext<B> {
    pub backend: Arc<B>,
    pub ids: Arc<dyn RecordIdGenerator>,
    pub formatter: Arc<dyn CurrencyFormatter>,
    pub quantity: QuantityController,
    pub favorite: FavoriteToggle,
    pub timeout: Option<Duration>,
    pub cancel: CancellationToken,
}

/// Run one remote call under the screen's cancellation scope and timeout.
pub(crate) async fn guarded<T, E, F>(
    op: RemoteOp,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
    call: F,
) -> Result<T, OrderError>
where
    F: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let bounded = async move {
        let outcome = match timeout {
            Some(after) => match tokio::time::timeout(after, call).await {
                Ok(outcome) => outcome,
                Err(_) => return Err(OrderError::TimedOut { op, after }),
            },
            None => call.await,
        };
        outcome.map_err(|source| OrderError::remote(op, source))
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(OrderError::Cancelled { op }),
        result = bounded => result,
    }
}

pub struct OrderScreen<B, N> {
    backend: Arc<B>,
    navigator: N,
    ids: Arc<dyn RecordIdGenerator>,
    formatter: Arc<dyn CurrencyFormatter>,
    item: Item,
    extras: ExtraRegistry,
    quantity: QuantityController,
    favorite: FavoriteToggle,
    timeout: Option<Duration>,
    cancel: CancellationToken,
}

impl<B, N: Navigator> OrderScreen<B, N> {
    pub(crate) fn open(
        context: ScreenContext<B>,
        navigator: N,
        item: Item,
        extras: ExtraRegistry,
    ) -> Self {
        let mut screen = Self {
            backend: context.backend,
            navigator,
            ids: context.ids,
            formatter: context.formatter,
            item,
            extras,
            quantity: context.quantity,
            favorite: context.favorite,
            timeout: context.timeout,
            cancel: context.cancel,
        };
        screen.publish_header();
        screen
    }

    fn publish_header(&mut self) {
        self.navigator.set_header_action(HeaderAction {
            icon: self.favorite.icon(),
        });
    }

    /// Add one of an add-on. Unknown ids are ignored.
    pub fn increment_extra(&mut self, extra_id: u64) -> &ExtraRegistry {
        self.extras = self.extras.increment(extra_id);
        log::debug!(
            "extra {extra_id} -> {:?}",
            self.extras.quantity_of(extra_id)
        );
        &self.extras
    }

    /// Remove one of an add-on, stopping at zero. Unknown ids are ignored.
    pub fn decrement_extra(&mut self, extra_id: u64) -> &ExtraRegistry {
        self.extras = self.extras.decrement(extra_id);
        log::debug!(
            "extra {extra_id} -> {:?}",
            self.extras.quantity_of(extra_id)
        );
        &self.extras
    }

    pub fn increment_food(&mut self) -> u32 {
        let quantity = self.quantity.increment();
        log::debug!("food quantity -> {quantity}");
        quantity
    }

    /// Remove one serving, never going below one.
    pub fn decrement_food(&mut self) -> u32 {
        let quantity = self.quantity.decrement();
        log::debug!("food quantity -> {quantity}");
        quantity
    }
}

impl<B, N> OrderScreen<B, N> {
    /// Cancel every in-flight and future remote call of this screen.
    pub fn dismiss(&mut self) {
        log::debug!("dismissing screen for food {}", self.item.id);
        self.cancel.cancel();
    }

    #[must_use]
    pub const fn item(&self) -> &Item {
        &self.item
    }

    #[must_use]
    pub const fn extras(&self) -> &ExtraRegistry {
        &self.extras
    }

    #[must_use]
    pub const fn food_quantity(&self) -> u32 {
        self.quantity.get()
    }

    #[must_use]
    pub const fn is_favorite(&self) -> bool {
        self.favorite.is_favorite()
    }

    #[must_use]
    pub const fn favorite_status(&self) -> FavoriteSync {
        self.favorite.status()
    }

    #[must_use]
    pub const fn favorite_icon(&self) -> FavoriteIcon {
        self.favorite.icon()
    }

    #[must_use]
    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    #[must_use]
    pub fn is_dismissed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token a host can cancel to abort this screen's remote calls.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    #[must_use]
    pub fn draft(&self) -> OrderDraft<'_> {
        OrderDraft::new(&self.item, self.quantity.get(), self.extras.lines())
    }

    /// Current total in minor units, always derived from the latest quantities.
    #[must_use]
    pub fn total(&self) -> i64 {
        compute_total(&self.item, self.extras.lines(), self.quantity.get())
    }

    #[must_use]
    pub fn formatted_total(&self) -> String {
        self.formatter.format(self.total())
    }

    #[must_use]
    pub fn selected_extras(&self) -> Vec<&ExtraLine> {
        self.extras.selected().collect()
    }
}

impl<B, N> OrderScreen<B, N>
where
    B: FavoritesStore + OrdersStore,
    N: Navigator,
{
    /// Flip the favorite flag now, then record it remotely.
    ///
    /// The header action is refreshed before the request is sent and again
    /// once it settles. Returns the flag after settling.
    ///
    /// # Errors
    ///
    /// Surfaces remote failures, timeouts and cancellation. The flag is then
    /// kept or reverted according to the configured policy.
    pub async fn toggle_favorite(&mut self) -> Result<bool, OrderError> {
        let ticket = self.favorite.begin();
        self.publish_header();

        let record = FavoriteRecord::snapshot(&self.item, self.ids.next_id());
        log::info!(
            "recording favorite {} for food {} ({})",
            record.id,
            self.item.id,
            self.favorite.is_favorite()
        );
        let outcome = guarded(
            RemoteOp::Favorite,
            &self.cancel,
            self.timeout,
            self.backend.add_favorite(&record),
        )
        .await;

        self.favorite.settle(ticket, outcome.is_ok());
        self.publish_header();

        match outcome {
            Ok(()) => Ok(self.favorite.is_favorite()),
            Err(err) => {
                log::warn!("favorite for food {} not recorded: {err}", self.item.id);
                Err(err)
            }
        }
    }

    /// Send the current draft to the orders store and leave the screen.
    ///
    /// Every extra line is sent, including zero-quantity ones. On failure
    /// the draft is left untouched and no navigation happens.
    ///
    /// # Errors
    ///
    /// Surfaces remote failures, timeouts and cancellation.
    pub async fn submit_order(&mut self) -> Result<OrderPayload, OrderError> {
        let payload = self.draft().to_payload(self.ids.next_id());
        log::info!(
            "submitting order {} for food {} x{} ({})",
            payload.id,
            payload.food_id,
            payload.quantity,
            self.formatter.format(payload.total)
        );

        if let Err(err) = guarded(
            RemoteOp::Submit,
            &self.cancel,
            self.timeout,
            self.backend.place_order(&payload),
        )
        .await
        {
            log::warn!("order {} not placed: {err}", payload.id);
            return Err(err);
        }

        self.navigator.go_back();
        Ok(payload)
    }
}
