//! Order total calculation.
//!
//! `total = (Σ extra.value × extra.quantity + item.price) × base_quantity`.
//! The base quantity scales the item *and* its add-ons: extras are chosen
//! per serving, not as a flat surcharge. All arithmetic saturates.
use crate::catalog::{ExtraLine, Item};

/// Sum of every add-on line's cost.
#[must_use]
pub fn extras_subtotal(extras: &[ExtraLine]) -> i64 {
    extras
        .iter()
        .fold(0i64, |acc, line| acc.saturating_add(line.cost()))
}

/// Price of one serving: the item plus its chosen add-ons.
#[must_use]
pub fn unit_price(item: &Item, extras: &[ExtraLine]) -> i64 {
    extras_subtotal(extras).saturating_add(item.price)
}

/// Total for `base_quantity` servings, in minor units.
#[must_use]
pub fn compute_total(item: &Item, extras: &[ExtraLine], base_quantity: u32) -> i64 {
    unit_price(item, extras).saturating_mul(i64::from(base_quantity))
}
