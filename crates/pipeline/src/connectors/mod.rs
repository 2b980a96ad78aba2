//! Built-in source connectors.
//!
//! One connector per [`SourceKind`](crate::sources::SourceKind): two
//! PostgreSQL tables, a MongoDB collection, and a public REST API. All of
//! them match records against the significant words of the query rather than
//! the full sentence.

pub mod mongo;
pub mod postgres;
pub mod rest;

pub use mongo::MongoDocsConnector;
pub use postgres::{PgProjectsConnector, PgUsersConnector};
pub use rest::CountriesApiConnector;

/// Upper bound on the number of terms extracted from one query.
const MAX_QUERY_TERMS: usize = 8;

/// Words too common to be worth matching on.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "of", "in", "on", "for", "and", "or", "is", "are", "was", "were", "what",
    "which", "who", "where", "when", "how", "show", "me", "all", "any", "to", "with", "about",
    "find", "list", "give", "tell", "does", "do", "has", "have", "many", "much", "their", "its",
];

/// Extract the significant words of a query for native matching.
///
/// Words are split on anything that is not alphanumeric, `_`, or `-`;
/// lowercased; and kept when they are at least three characters, not a stop
/// word, and not already seen. At most [`MAX_QUERY_TERMS`] terms are
/// returned, in query order.
pub(crate) fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for word in query.split(|c: char| !c.is_alphanumeric() && c != '_' && c != '-') {
        let word = word.to_lowercase();
        if word.len() < 3 || STOP_WORDS.contains(&word.as_str()) || terms.contains(&word) {
            continue;
        }

        terms.push(word);
        if terms.len() == MAX_QUERY_TERMS {
            break;
        }
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_and_short_words_are_dropped() {
        assert_eq!(
            query_terms("show me the department of user_10"),
            vec!["department", "user_10"]
        );
    }

    #[test]
    fn test_terms_are_deduplicated_in_order() {
        assert_eq!(
            query_terms("projects, projects and more projects"),
            vec!["projects", "more"]
        );
    }

    #[test]
    fn test_no_significant_words() {
        assert!(query_terms("what is the...").is_empty());
    }

    #[test]
    fn test_term_cap() {
        let query = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        assert_eq!(query_terms(query).len(), MAX_QUERY_TERMS);
    }
}
