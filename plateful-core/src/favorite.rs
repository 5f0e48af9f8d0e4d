//! Favorite flag with optimistic updates.
//!
//! A toggle flips the flag immediately ([`FavoriteToggle::begin`]) and is
//! later settled with the remote outcome ([`FavoriteToggle::settle`]).
//! Only the most recent toggle may settle; older tickets are stale.
use serde::{Deserialize, Serialize};

use crate::catalog::Item;
use crate::ids::RecordId;

/// Synchronization status of the latest toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteSync {
    /// Never toggled on this screen.
    #[default]
    Idle,
    Pending,
    Confirmed,
    Failed,
}

/// What to do with the optimistic flag when the remote store rejects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteFailurePolicy {
    /// Leave the flag flipped and report the failure.
    #[default]
    Keep,
    /// Restore the value from before the failed toggle.
    Revert,
}

/// Handle for one in-flight toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteTicket {
    generation: u64,
    previous: bool,
}

/// Header icon reflecting the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FavoriteIcon {
    Favorite,
    FavoriteBorder,
}

impl FavoriteIcon {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::FavoriteBorder => "favorite-border",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    favorite: bool,
    status: FavoriteSync,
    generation: u64,
    policy: FavoriteFailurePolicy,
}

impl FavoriteToggle {
    /// Starts as not-favorite; no remote state is consulted.
    #[must_use]
    pub const fn new(policy: FavoriteFailurePolicy) -> Self {
        Self {
            favorite: false,
            status: FavoriteSync::Idle,
            generation: 0,
            policy,
        }
    }

    #[must_use]
    pub const fn is_favorite(&self) -> bool {
        self.favorite
    }

    #[must_use]
    pub const fn status(&self) -> FavoriteSync {
        self.status
    }

    #[must_use]
    pub const fn policy(&self) -> FavoriteFailurePolicy {
        self.policy
    }

    #[must_use]
    pub const fn icon(&self) -> FavoriteIcon {
        if self.favorite {
            FavoriteIcon::Favorite
        } else {
            FavoriteIcon::FavoriteBorder
        }
    }

    /// Flip the flag now and mark the request pending.
    pub fn begin(&mut self) -> FavoriteTicket {
        let previous = self.favorite;
        self.favorite = !previous;
        self.generation += 1;
        self.status = FavoriteSync::Pending;
        log::debug!(
            "favorite toggled to {} (request #{})",
            self.favorite,
            self.generation
        );
        FavoriteTicket {
            generation: self.generation,
            previous,
        }
    }

    /// Record the remote outcome. Returns `false` when `ticket` was superseded.
    pub fn settle(&mut self, ticket: FavoriteTicket, confirmed: bool) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "ignoring stale favorite outcome #{} (latest #{})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        if confirmed {
            self.status = FavoriteSync::Confirmed;
        } else {
            self.status = FavoriteSync::Failed;
            if self.policy == FavoriteFailurePolicy::Revert {
                self.favorite = ticket.previous;
            }
        }
        true
    }
}

impl Default for FavoriteToggle {
    fn default() -> Self {
        Self::new(FavoriteFailurePolicy::default())
    }
}

/// Body of the favorites store request: a snapshot of the item's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    #[serde(with = "crate::money::decimal")]
    pub price: i64,
    pub category: u64,
    pub image_url: String,
    pub thumbnail_url: String,
}

impl FavoriteRecord {
    #[must_use]
    pub fn snapshot(item: &Item, id: RecordId) -> Self {
        Self {
            id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            category: item.category,
            image_url: item.image_url.clone(),
            thumbnail_url: item.thumbnail_url.clone(),
        }
    }
}
