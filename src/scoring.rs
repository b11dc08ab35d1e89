//! Lexical relevance scoring for index nodes

use crate::text::normalize_text;
use crate::types::Node;

/// Count query terms (with repeats) found as substrings of the node's
/// title, summary and text.
///
/// Matching is plain substring containment, so `"cat"` also hits `"category"`.
pub fn score_node(node: &Node, query_terms: &[String]) -> usize {
    let parts = [
        normalize_text(node.title()),
        normalize_text(node.summary()),
        normalize_text(node.text()),
    ];
    if parts.iter().all(String::is_empty) {
        return 0;
    }
    let haystack = parts.join(" ");

    query_terms
        .iter()
        .filter(|term| haystack.contains(term.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::query_terms;

    #[test]
    fn test_counts_each_term() {
        let node = Node::new("Intro").with_text("Cats are   mammals");
        assert_eq!(score_node(&node, &query_terms("what are cats")), 2);
        assert_eq!(score_node(&node, &query_terms("dogs")), 0);
    }

    #[test]
    fn test_repeated_terms_double_score() {
        let node = Node::new("a section");
        let single = score_node(&node, &["a".to_string()]);
        let double = score_node(&node, &["a".to_string(), "a".to_string()]);
        assert_eq!(single, 1);
        assert_eq!(double, 2 * single);
    }

    #[test]
    fn test_substring_match() {
        let node = Node::new("Category theory");
        assert_eq!(score_node(&node, &["cat".to_string()]), 1);
    }

    #[test]
    fn test_summary_is_searched() {
        let node = Node::default().with_summary("Ringkasan tentang fotosintesis");
        assert_eq!(score_node(&node, &["fotosintesis".to_string()]), 1);
    }

    #[test]
    fn test_empty_node_scores_zero() {
        assert_eq!(score_node(&Node::default(), &["x".to_string()]), 0);
    }
}
