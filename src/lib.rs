//! PageIndex QA - question answering over hierarchical document indexes
//!
//! Answers questions by grounding an LLM on sections picked from
//! `*_structure.json` tree indexes:
//! - Pre-order flattening of single- or list-rooted trees
//! - Lexical term-count scoring with stable top-k selection
//! - Document-order fallback when nothing matches
//! - One aggregate prompt and one generation call per question

pub mod types;
pub mod config;
pub mod error;
pub mod tree;
pub mod text;
pub mod scoring;
pub mod selection;
pub mod prompt;
pub mod index_store;
pub mod context_engine;
pub mod generators;
pub mod http_generator;
pub mod server;

pub use types::*;
pub use config::QaConfig;
pub use error::{QaError, QaResult};
pub use context_engine::{ContextEngine, SharedContextEngine};
pub use generators::{AnswerGenerator, MockGenerator};
pub use http_generator::OpenAiGenerator;
pub use index_store::IndexStore;

#[cfg(test)]
mod tests;
