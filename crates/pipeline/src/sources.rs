//! Source kinds and the records they return.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The data sources the pipeline can draw on.
///
/// This is a closed set of *active* sources: a source that is not wired up
/// is simply not a variant. The declaration order is significant: it is the
/// evaluation order of the router and the block order of the assembled
/// context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// PostgreSQL `users` table
    RelationalUsers,

    /// PostgreSQL `projects` table
    RelationalProjects,

    /// MongoDB `documents` collection (design docs, reports, notes)
    DocumentStore,

    /// Public REST countries API
    RestApi,
}

impl SourceKind {
    /// All active sources, in evaluation order.
    pub const ALL: [SourceKind; 4] = [
        SourceKind::RelationalUsers,
        SourceKind::RelationalProjects,
        SourceKind::DocumentStore,
        SourceKind::RestApi,
    ];

    /// Fixed tag used to label this source's block in the assembled context.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::RelationalUsers => "PG_USERS",
            SourceKind::RelationalProjects => "PG_PROJECTS",
            SourceKind::DocumentStore => "MONGO_DOCS",
            SourceKind::RestApi => "REST_COUNTRIES",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One record fetched from a source, already rendered to text.
///
/// The native shape (SQL row, BSON document, JSON object) is opaque to the
/// pipeline: connectors render it however their system does, and the record
/// only lives from retrieval to context assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedRecord {
    /// The source this record came from
    pub kind: SourceKind,

    /// Text rendering of the native record
    pub text: String,
}

impl RetrievedRecord {
    /// Create a record owned by `kind`.
    pub fn new(kind: SourceKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_fixed() {
        assert_eq!(SourceKind::RelationalUsers.label(), "PG_USERS");
        assert_eq!(SourceKind::RelationalProjects.label(), "PG_PROJECTS");
        assert_eq!(SourceKind::DocumentStore.label(), "MONGO_DOCS");
        assert_eq!(SourceKind::RestApi.label(), "REST_COUNTRIES");
    }

    #[test]
    fn test_enumeration_order() {
        assert_eq!(
            SourceKind::ALL,
            [
                SourceKind::RelationalUsers,
                SourceKind::RelationalProjects,
                SourceKind::DocumentStore,
                SourceKind::RestApi,
            ]
        );
    }

    #[test]
    fn test_display_matches_label() {
        for kind in SourceKind::ALL {
            assert_eq!(kind.to_string(), kind.label());
        }
    }
}
