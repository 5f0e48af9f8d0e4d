//! Registry of add-on lines offered for the current item.
//!
//! Updates are copy-on-write: `increment` and `decrement` return a new
//! registry and never touch the receiver, so a host comparing snapshots
//! sees every change. Unknown ids are ignored rather than reported.
use crate::catalog::ExtraLine;
use crate::quantity::QuantityRule;

/// Ordered, id-keyed add-on lines with their chosen quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraRegistry {
    lines: Vec<ExtraLine>,
    rule: QuantityRule,
}

impl ExtraRegistry {
    /// Build a registry with every quantity reset to the rule's floor.
    ///
    /// Callers are expected to have checked id uniqueness.
    #[must_use]
    pub fn seed(lines: Vec<ExtraLine>, rule: QuantityRule) -> Self {
        let lines = lines
            .into_iter()
            .map(|line| ExtraLine {
                quantity: rule.floor,
                ..line
            })
            .collect();
        Self { lines, rule }
    }

    #[must_use]
    pub fn lines(&self) -> &[ExtraLine] {
        &self.lines
    }

    #[must_use]
    pub const fn rule(&self) -> QuantityRule {
        self.rule
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: u64) -> Option<&ExtraLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    #[must_use]
    pub fn quantity_of(&self, id: u64) -> Option<u32> {
        self.find(id).map(|line| line.quantity)
    }

    /// Lines with a non-zero quantity, for display only.
    pub fn selected(&self) -> impl Iterator<Item = &ExtraLine> {
        self.lines.iter().filter(|line| line.quantity > 0)
    }

    /// New registry with one more of `id`; unchanged copy if `id` is unknown.
    #[must_use]
    pub fn increment(&self, id: u64) -> Self {
        self.step(id, QuantityRule::increment)
    }

    /// New registry with one less of `id` (clamped); unchanged copy if `id` is unknown.
    #[must_use]
    pub fn decrement(&self, id: u64) -> Self {
        self.step(id, QuantityRule::decrement)
    }

    fn step(&self, id: u64, apply: impl Fn(QuantityRule, u32) -> u32) -> Self {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                if line.id == id {
                    ExtraLine {
                        quantity: apply(self.rule, line.quantity),
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect();
        Self {
            lines,
            rule: self.rule,
        }
    }
}
