//! Context block rendering and grounding prompt assembly
//!
//! Labels and instructions are Indonesian; answers are expected in the
//! language of the indexed books.

use crate::types::{BodySource, Node};

pub const NO_TITLE: &str = "(Tanpa judul)";
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

const PREAMBLE: &str = "Gunakan konteks berikut untuk menjawab pertanyaan pengguna secara singkat dan jelas.\n\
Jika jawabannya tidak ditemukan, katakan bahwa informasinya tidak ada di konteks.\n\n";

/// Render one node as a context block
pub fn format_node(node: &Node, body_source: BodySource) -> String {
    let title = node.title().unwrap_or(NO_TITLE);
    let body = match body_source {
        BodySource::PreferSummary => node.summary().or(node.text()),
        BodySource::PreferText => node.text().or(node.summary()),
    }
    .unwrap_or("");

    match node.page_locator() {
        Some(page) => format!("Judul: {}\nHalaman: {}\nIsi: {}", title, page, body),
        None => format!("Judul: {}\nIsi: {}", title, body),
    }
}

/// Build the final prompt from the question and rendered blocks
pub fn build_prompt(question: &str, contexts: &[String]) -> String {
    let joined = contexts.join(CONTEXT_SEPARATOR);
    format!(
        "{}KONTEKS:\n{}\n\nPERTANYAAN: {}\n\nJAWABAN:",
        PREAMBLE, joined, question
    )
}
