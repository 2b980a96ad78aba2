//! Context assembly: labeled source blocks under a hard size cap.

use crate::sources::{RetrievedRecord, SourceKind};

/// Maximum size of the assembled context, in characters.
pub const MAX_CONTEXT_CHARS: usize = 10_000;

/// Merge per-source record sets into one labeled context string.
///
/// For each source, in the router-selection order of `results`, records are
/// rendered inside a `<LABEL> … </LABEL>` block; blocks are joined by blank
/// lines. Sources with zero records are omitted entirely (the deterministic
/// choice documented in DESIGN.md). If the concatenation exceeds
/// [`MAX_CONTEXT_CHARS`] it is cut at exactly that many characters, and the cut
/// does not respect block boundaries.
pub fn assemble(results: &[(SourceKind, Vec<RetrievedRecord>)]) -> String {
    let blocks: Vec<String> = results
        .iter()
        .filter(|(_, records)| !records.is_empty())
        .map(|(kind, records)| render_block(*kind, records))
        .collect();

    truncate_chars(blocks.join("\n\n"), MAX_CONTEXT_CHARS)
}

/// Render one source's records as a labeled block.
fn render_block(kind: SourceKind, records: &[RetrievedRecord]) -> String {
    let body = records
        .iter()
        .map(|record| record.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    format!("<{label}>\n{body}\n</{label}>", label = kind.label())
}

/// Hard-cut `text` to at most `max` characters.
fn truncate_chars(mut text: String, max: usize) -> String {
    if let Some((byte_index, _)) = text.char_indices().nth(max) {
        text.truncate(byte_index);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(kind: SourceKind, texts: &[&str]) -> (SourceKind, Vec<RetrievedRecord>) {
        (
            kind,
            texts
                .iter()
                .map(|t| RetrievedRecord::new(kind, *t))
                .collect(),
        )
    }

    #[test]
    fn test_single_block_rendering() {
        let results = vec![records(
            SourceKind::RelationalUsers,
            &["Username: user_1", "Username: user_2"],
        )];

        let context = assemble(&results);
        assert_eq!(
            context,
            "<PG_USERS>\nUsername: user_1\nUsername: user_2\n</PG_USERS>"
        );
    }

    #[test]
    fn test_blocks_follow_selection_order() {
        let results = vec![
            records(SourceKind::DocumentStore, &["doc one"]),
            records(SourceKind::RelationalUsers, &["Username: user_1"]),
        ];

        let context = assemble(&results);
        let docs_at = context.find("<MONGO_DOCS>").unwrap();
        let users_at = context.find("<PG_USERS>").unwrap();
        assert!(docs_at < users_at);
    }

    #[test]
    fn test_empty_sources_are_omitted() {
        let results = vec![
            records(SourceKind::RelationalUsers, &[]),
            records(SourceKind::RestApi, &["{\"name\":\"France\"}"]),
        ];

        let context = assemble(&results);
        assert!(!context.contains("PG_USERS"));
        assert!(context.starts_with("<REST_COUNTRIES>"));
    }

    #[test]
    fn test_no_results_yields_empty_context() {
        assert_eq!(assemble(&[]), "");
    }

    #[test]
    fn test_under_cap_is_untouched() {
        let body = "x".repeat(5_000);
        let results = vec![records(SourceKind::DocumentStore, &[body.as_str()])];

        let context = assemble(&results);
        assert!(context.chars().count() <= MAX_CONTEXT_CHARS);
        assert!(context.contains(&body));
    }

    #[test]
    fn test_over_cap_is_cut_to_exactly_the_limit() {
        // Two blocks totalling ~12,000 characters; the cut lands mid-block.
        let body = "y".repeat(6_000);
        let results = vec![
            records(SourceKind::RelationalUsers, &[body.as_str()]),
            records(SourceKind::DocumentStore, &[body.as_str()]),
        ];

        let context = assemble(&results);
        assert_eq!(context.chars().count(), MAX_CONTEXT_CHARS);
        assert!(!context.ends_with("</MONGO_DOCS>"));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "é".repeat(8);
        assert_eq!(truncate_chars(text, 5), "é".repeat(5));
    }
}
