//! Order drafts and the submission payload built from them.
use serde::{Deserialize, Serialize};

use crate::catalog::{ExtraLine, Item};
use crate::ids::RecordId;
use crate::pricing::compute_total;

/// Ephemeral view of what the user is about to order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDraft<'a> {
    pub item: &'a Item,
    pub quantity: u32,
    pub extras: &'a [ExtraLine],
}

impl<'a> OrderDraft<'a> {
    #[must_use]
    pub const fn new(item: &'a Item, quantity: u32, extras: &'a [ExtraLine]) -> Self {
        Self {
            item,
            quantity,
            extras,
        }
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        compute_total(self.item, self.extras, self.quantity)
    }

    /// Build the orders store body. Every extra line is included, even at quantity 0.
    #[must_use]
    pub fn to_payload(&self, id: RecordId) -> OrderPayload {
        OrderPayload {
            id,
            food_id: self.item.id,
            name: self.item.name.clone(),
            description: self.item.description.clone(),
            category: self.item.category,
            thumbnail_url: self.item.thumbnail_url.clone(),
            image_url: self.item.image_url.clone(),
            price: self.item.price,
            formatted_price: self.item.formatted_price.clone(),
            extras: self.extras.to_vec(),
            quantity: self.quantity,
            total: self.total(),
        }
    }
}

/// Body of the orders store request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub id: RecordId,
    pub food_id: u64,
    pub name: String,
    pub description: String,
    pub category: u64,
    pub thumbnail_url: String,
    pub image_url: String,
    #[serde(with = "crate::money::decimal")]
    pub price: i64,
    #[serde(rename = "formattedPrice")]
    pub formatted_price: String,
    pub extras: Vec<ExtraLine>,
    pub quantity: u32,
    #[serde(with = "crate::money::decimal")]
    pub total: i64,
}
