//! Backing Source Adapters
//!
//! Each adapter wraps one raw capability port and exposes it through the
//! uniform [`BackingSource`](crate::ports::BackingSource) contract the
//! resolver dispatches on.
//!
//! | Adapter | Kinds | Failure policy |
//! |---------|-------|----------------|
//! | [`RelationalCountAdapter`] | `UserCount` | `BackingStore` error |
//! | [`AnalyticalAggregateAdapter`] | `TopRecordings`, `TopArtists`, `TopReleases` | `BackingStore` error |
//! | [`QueueDepthAdapter`] | `QueueDepth` | `Unavailable` |
//! | [`ImporterQueueAdapter`] | `ImporterQueueSize` | `Unavailable` |
//! | [`ListenCountAdapter`] | `ListenCount` | `BackingStore` error |

pub mod analytical;
pub mod listens;
pub mod queue;
pub mod relational;

pub use analytical::AnalyticalAggregateAdapter;
pub use listens::ListenCountAdapter;
pub use queue::{ImporterQueueAdapter, QueueDepthAdapter};
pub use relational::RelationalCountAdapter;

use lbstats_domain::error::{Error, SourceKind};

/// Tag a capability failure with the source it came from
///
/// Errors that are already `BackingStore` keep their original kind.
pub(crate) fn backing_error(kind: SourceKind, context: &str, err: Error) -> Error {
    match err {
        err @ Error::BackingStore { .. } => err,
        other => Error::backing_store_with_source(kind, context, other),
    }
}
