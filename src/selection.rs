//! Top-k node selection with document-order fallback

use crate::scoring::score_node;
use crate::types::Node;

/// Node paired with its relevance score
#[derive(Debug, Clone, Copy)]
pub struct ScoredNode<'a> {
    pub node: &'a Node,
    pub score: usize,
}

/// Nodes chosen for one index
#[derive(Debug)]
pub struct Selection<'a> {
    pub nodes: Vec<ScoredNode<'a>>,
    /// True when nothing matched and the first nodes were taken instead
    pub fallback: bool,
}

impl<'a> Selection<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.iter().map(|s| s.node)
    }
}

/// Select up to `top_k` nodes by score.
///
/// Ties keep document order. Zero-scored nodes are dropped unless every
/// node scored zero, in which case the first `top_k` nodes are returned.
pub fn select_top_k<'a, I>(nodes: I, query_terms: &[String], top_k: usize) -> Selection<'a>
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut scored: Vec<ScoredNode<'a>> = nodes
        .into_iter()
        .map(|node| ScoredNode {
            node,
            score: score_node(node, query_terms),
        })
        .collect();

    // `sort_by` is stable, so equal scores stay in document order
    let mut ranked = scored.clone();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    let top: Vec<ScoredNode<'a>> = ranked
        .into_iter()
        .filter(|s| s.score > 0)
        .take(top_k)
        .collect();

    if !top.is_empty() {
        return Selection {
            nodes: top,
            fallback: false,
        };
    }

    scored.truncate(top_k);
    Selection {
        nodes: scored,
        fallback: true,
    }
}
