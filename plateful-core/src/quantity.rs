//! Increment/decrement logic with a floor clamp and an optional ceiling.
//!
//! The same rule type drives add-on quantities (floor 0) and the base item
//! quantity (floor 1). Out-of-range steps are clamped silently; they are
//! never reported as errors.
use serde::{Deserialize, Serialize};

/// Clamp bounds for a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRule {
    pub floor: u32,
    /// Inclusive upper bound; `None` leaves increments unbounded.
    pub ceiling: Option<u32>,
}

impl QuantityRule {
    /// Add-on quantities may drop to zero.
    pub const EXTRA: Self = Self {
        floor: 0,
        ceiling: None,
    };

    /// A zero or negative base quantity cannot be ordered.
    pub const FOOD: Self = Self {
        floor: 1,
        ceiling: None,
    };

    #[must_use]
    pub const fn with_ceiling(self, ceiling: Option<u32>) -> Self {
        Self {
            floor: self.floor,
            ceiling,
        }
    }

    /// Next value after one increment. Staying put at the ceiling.
    #[must_use]
    pub fn increment(self, current: u32) -> u32 {
        match self.ceiling {
            Some(ceiling) if current >= ceiling => current,
            _ => current.saturating_add(1),
        }
    }

    /// Next value after one decrement, never below the floor.
    #[must_use]
    pub const fn decrement(self, current: u32) -> u32 {
        if current > self.floor {
            current - 1
        } else {
            self.floor
        }
    }

    /// Whether `value` lies within the bounds.
    #[must_use]
    pub fn admits(self, value: u32) -> bool {
        value >= self.floor && self.ceiling.is_none_or(|ceiling| value <= ceiling)
    }
}

impl Default for QuantityRule {
    fn default() -> Self {
        Self::EXTRA
    }
}

/// A single quantity value governed by a [`QuantityRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityController {
    value: u32,
    rule: QuantityRule,
}

impl QuantityController {
    /// Start at the rule's floor.
    #[must_use]
    pub const fn new(rule: QuantityRule) -> Self {
        Self {
            value: rule.floor,
            rule,
        }
    }

    #[must_use]
    pub const fn get(&self) -> u32 {
        self.value
    }

    #[must_use]
    pub const fn rule(&self) -> QuantityRule {
        self.rule
    }

    /// Step up by one and return the new value.
    pub fn increment(&mut self) -> u32 {
        self.value = self.rule.increment(self.value);
        self.value
    }

    /// Step down by one (clamped) and return the new value.
    pub fn decrement(&mut self) -> u32 {
        self.value = self.rule.decrement(self.value);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_quantity_starts_at_one_and_never_drops_below() {
        let mut quantity = QuantityController::new(QuantityRule::FOOD);
        assert_eq!(quantity.get(), 1);
        for _ in 0..5 {
            assert_eq!(quantity.decrement(), 1);
        }
        assert_eq!(quantity.increment(), 2);
        assert_eq!(quantity.increment(), 3);
        assert_eq!(quantity.decrement(), 2);
    }

    #[test]
    fn extra_rule_clamps_at_zero() {
        let rule = QuantityRule::EXTRA;
        assert_eq!(rule.decrement(0), 0);
        assert_eq!(rule.decrement(1), 0);
        assert_eq!(rule.increment(0), 1);
    }

    #[test]
    fn ceiling_stops_increments() {
        let rule = QuantityRule::FOOD.with_ceiling(Some(3));
        assert_eq!(rule.increment(2), 3);
        assert_eq!(rule.increment(3), 3);
        assert!(rule.admits(3));
        assert!(!rule.admits(4));
        assert!(!rule.admits(0));
    }

    #[test]
    fn unbounded_rule_saturates_instead_of_wrapping() {
        assert_eq!(QuantityRule::EXTRA.increment(u32::MAX), u32::MAX);
    }

    #[test]
    fn arbitrary_decrement_sequences_respect_the_floor() {
        for rule in [QuantityRule::EXTRA, QuantityRule::FOOD] {
            let mut quantity = QuantityController::new(rule);
            for step in 0..50u32 {
                if step % 3 == 0 {
                    quantity.increment();
                } else {
                    quantity.decrement();
                }
                assert!(quantity.get() >= rule.floor);
            }
        }
    }
}
