use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::catalog::CatalogError;

/// The three suspension points of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    Load,
    Favorite,
    Submit,
}

impl fmt::Display for RemoteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Load => "load food",
            Self::Favorite => "mark favorite",
            Self::Submit => "submit order",
        })
    }
}

/// Failures surfaced by screen operations.
///
/// Lookup misses and quantity clamps are not errors and never appear here.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{op} failed: {source}")]
    Remote {
        op: RemoteOp,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("{op} cancelled: screen dismissed")]
    Cancelled { op: RemoteOp },
    #[error("{op} timed out after {after:?}")]
    TimedOut { op: RemoteOp, after: Duration },
    #[error("catalog response rejected: {0}")]
    InvalidCatalog(#[from] CatalogError),
}

impl OrderError {
    pub(crate) fn remote<E>(op: RemoteOp, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Remote {
            op,
            source: Box::new(source),
        }
    }

    /// Which remote call failed, if any.
    #[must_use]
    pub const fn op(&self) -> Option<RemoteOp> {
        match self {
            Self::Remote { op, .. } | Self::Cancelled { op } | Self::TimedOut { op, .. } => {
                Some(*op)
            }
            Self::InvalidCatalog(_) => Some(RemoteOp::Load),
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
