//! Menu items, add-on lines, and the catalog response they are seeded from.
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::extras::ExtraRegistry;
use crate::format::CurrencyFormatter;
use crate::quantity::QuantityRule;

/// The orderable menu entry shown on the screen.
///
/// Immutable once loaded; `formatted_price` is derived a single time at load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: u64,
    pub thumbnail_url: String,
    pub image_url: String,
    /// Unit price in minor units.
    #[serde(with = "crate::money::decimal")]
    pub price: i64,
    #[serde(rename = "formattedPrice")]
    pub formatted_price: String,
}

/// A selectable add-on and the quantity chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraLine {
    pub id: u64,
    pub name: String,
    /// Unit value in minor units.
    #[serde(with = "crate::money::decimal")]
    pub value: i64,
    #[serde(default)]
    pub quantity: u32,
}

impl ExtraLine {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, value: i64) -> Self {
        Self {
            id,
            name: name.into(),
            value,
            quantity: 0,
        }
    }

    /// Line cost: unit value times chosen quantity.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.value.saturating_mul(i64::from(self.quantity))
    }
}

/// Response body of the catalog fetch: the item plus its offered add-ons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFood {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: u64,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(with = "crate::money::decimal")]
    pub price: i64,
    #[serde(default, deserialize_with = "offered_extras")]
    pub extras: Vec<ExtraLine>,
}

/// Wire shape of an offered add-on. Whatever quantity the server attaches
/// is never read, so a malformed one cannot fail the load.
#[derive(Deserialize)]
struct OfferedExtra {
    id: u64,
    name: String,
    #[serde(with = "crate::money::decimal")]
    value: i64,
}

fn offered_extras<'de, D>(deserializer: D) -> Result<Vec<ExtraLine>, D::Error>
where
    D: Deserializer<'de>,
{
    let offered = Vec::<OfferedExtra>::deserialize(deserializer)?;
    Ok(offered
        .into_iter()
        .map(|extra| ExtraLine::new(extra.id, extra.name, extra.value))
        .collect())
}

/// Reasons a catalog response cannot seed a screen.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("extra {id} is listed more than once")]
    DuplicateExtra { id: u64 },
    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: String, value: i64 },
}

impl CatalogFood {
    /// Split the response into the immutable item and a freshly seeded registry.
    ///
    /// Every add-on starts at quantity 0 no matter what the server sent.
    ///
    /// # Errors
    ///
    /// Rejects duplicate extra identifiers and negative prices.
    pub fn seed(
        self,
        formatter: &dyn CurrencyFormatter,
        extra_rule: QuantityRule,
    ) -> Result<(Item, ExtraRegistry), CatalogError> {
        self.validate()?;
        let item = Item {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category,
            thumbnail_url: self.thumbnail_url,
            image_url: self.image_url,
            price: self.price,
            formatted_price: formatter.format(self.price),
        };
        let registry = ExtraRegistry::seed(self.extras, extra_rule);
        Ok((item, registry))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.price < 0 {
            return Err(CatalogError::NegativeAmount {
                field: String::from("price"),
                value: self.price,
            });
        }
        let mut seen = HashSet::with_capacity(self.extras.len());
        for extra in &self.extras {
            if !seen.insert(extra.id) {
                return Err(CatalogError::DuplicateExtra { id: extra.id });
            }
            if extra.value < 0 {
                return Err(CatalogError::NegativeAmount {
                    field: format!("extras[{}].value", extra.id),
                    value: extra.value,
                });
            }
        }
        Ok(())
    }
}
