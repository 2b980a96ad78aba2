//! Keyword routing from a query to the sources worth asking.

use crate::sources::SourceKind;

/// Static keyword table, one entry per source in evaluation order.
///
/// A source is selected iff any of its keywords is a substring of the
/// lowercased query. The table is fixed at compile time and never mutated.
const ROUTING_TABLE: &[(SourceKind, &[&str])] = &[
    (
        SourceKind::RelationalUsers,
        &["user", "profile", "employee", "staff", "department"],
    ),
    (
        SourceKind::RelationalProjects,
        &["project", "milestone", "task", "team", "priority"],
    ),
    (
        SourceKind::DocumentStore,
        &["document", "report", "design", "runbook", "note", "spec"],
    ),
    (
        SourceKind::RestApi,
        &["country", "capital", "population", "region", "city"],
    ),
];

/// Map a query to the ordered set of sources to fetch from.
///
/// Matching is a plain boolean substring test against the lowercased query;
/// there is no ranking among matched sources and no fallback source. An
/// empty result is valid and means no source claims the query.
///
/// Pure function of the query and [`ROUTING_TABLE`].
pub fn route(query: &str) -> Vec<SourceKind> {
    let lowered = query.to_lowercase();

    ROUTING_TABLE
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(kind, _)| *kind)
        .collect()
}

/// The trigger keywords for one source (used by the `route` CLI command).
pub fn keywords_for(kind: SourceKind) -> &'static [&'static str] {
    ROUTING_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_query_routes_to_users() {
        let selected = route("show me user_10");
        assert!(selected.contains(&SourceKind::RelationalUsers));
    }

    #[test]
    fn test_capital_query_routes_to_rest_api() {
        let selected = route("what is the capital of france");
        assert!(selected.contains(&SourceKind::RestApi));
    }

    #[test]
    fn test_unmatched_query_routes_nowhere() {
        assert!(route("xyzzy").is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let selected = route("Which DEPARTMENT is user_10 in?");
        assert_eq!(selected, vec![SourceKind::RelationalUsers]);
    }

    #[test]
    fn test_multi_source_selection_keeps_evaluation_order() {
        // "project" appears before "employee" in the query, but selection
        // order follows the source enumeration, not keyword position.
        let selected = route("which project is employee user_3 on?");
        assert_eq!(
            selected,
            vec![SourceKind::RelationalUsers, SourceKind::RelationalProjects]
        );
    }

    #[test]
    fn test_every_source_has_keywords() {
        for kind in SourceKind::ALL {
            assert!(!keywords_for(kind).is_empty());
        }
    }
}
