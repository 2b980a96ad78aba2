//! The source connector seam.

use async_trait::async_trait;
use tributary_core::AppResult;

use crate::sources::{RetrievedRecord, SourceKind};

/// A capability that executes a native query against one external data
/// system and returns a bounded, already-rendered record set.
///
/// # Contract
///
/// - At most `limit` records are returned, in the source's native order;
///   the pipeline never re-ranks across sources.
/// - The connector owns its connection lifecycle: clients/pools are held
///   internally and per-call acquisitions are scoped so they are released on
///   every exit path.
/// - Errors are reported, not hidden; the *pipeline* decides that a failed
///   source degrades to zero records.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use tributary_core::AppResult;
/// use tributary_pipeline::{Connector, RetrievedRecord, SourceKind};
///
/// struct CannedUsers;
///
/// #[async_trait]
/// impl Connector for CannedUsers {
///     fn kind(&self) -> SourceKind {
///         SourceKind::RelationalUsers
///     }
///
///     async fn fetch(&self, _query: &str, limit: usize) -> AppResult<Vec<RetrievedRecord>> {
///         Ok(vec![RetrievedRecord::new(SourceKind::RelationalUsers, "Username: demo")]
///             .into_iter()
///             .take(limit)
///             .collect())
///     }
/// }
/// ```
#[async_trait]
pub trait Connector: Send + Sync {
    /// The source this connector serves. Exactly one connector per kind is
    /// registered with the pipeline.
    fn kind(&self) -> SourceKind;

    /// Fetch up to `limit` records relevant to `query`.
    async fn fetch(&self, query: &str, limit: usize) -> AppResult<Vec<RetrievedRecord>>;
}
