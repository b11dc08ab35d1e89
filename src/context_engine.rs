//! Core ContextEngine for answering questions from document indexes

use crate::config::QaConfig;
use crate::error::{QaError, QaResult};
use crate::generators::AnswerGenerator;
use crate::index_store::{book_id_from_path, IndexStore};
use crate::prompt::{build_prompt, format_node};
use crate::selection::select_top_k;
use crate::text::query_terms;
use crate::types::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Main context engine (thread-safe via Arc)
pub struct ContextEngine {
    pub generator: Box<dyn AnswerGenerator>,
    pub store: IndexStore,
    pub config: QaConfig,
}

pub type SharedContextEngine = Arc<ContextEngine>;

/// Context blocks gathered across indexes for one question
#[derive(Debug, Default)]
pub struct CollectedContext {
    pub contexts: Vec<String>,
    pub used_books: Vec<String>,
    pub used_index_paths: Vec<String>,
}

impl ContextEngine {
    pub fn new(generator: Box<dyn AnswerGenerator>, config: QaConfig) -> SharedContextEngine {
        let store = IndexStore::new(config.results_dir.clone());
        Arc::new(Self {
            generator,
            store,
            config,
        })
    }

    /// Main entry point: answer a question from the selected indexes
    pub async fn answer(&self, req: AskRequest) -> QaResult<AskResponse> {
        let start = Instant::now();

        // Step 0: Validate input before touching any index
        let query = self.build_query(&req)?;
        let selection = IndexSelection::from_parts(req.books.clone(), req.index_paths.clone());

        // Step 1: Resolve index files
        let paths = self.store.resolve(&selection)?;
        info!(
            "Answering question: indexes={}, top_k={}, terms={}",
            paths.len(),
            query.top_k,
            query.query_terms.len()
        );

        // Step 2: Score, select and render per index
        let collected = self.collect_contexts(&query, &paths)?;
        if collected.contexts.is_empty() {
            return Err(QaError::NoContent);
        }

        // Step 3: One generation call for the aggregate prompt
        let model = req.model.as_deref().unwrap_or(&self.config.model);
        let prompt = build_prompt(&query.question, &collected.contexts);
        let answer = self
            .generator
            .generate(model, &prompt)
            .await
            .map_err(|e| {
                error!("Generator {} failed: {:?}", self.generator.name(), e);
                QaError::Upstream(e)
            })?;

        info!(
            "Answered from {} contexts across {} books in {}ms",
            collected.contexts.len(),
            collected.used_books.len(),
            start.elapsed().as_millis()
        );

        Ok(AskResponse {
            answer,
            used_books: collected.used_books,
            used_index_paths: collected.used_index_paths,
        })
    }

    /// Validate the request and apply configured defaults
    pub fn build_query(&self, req: &AskRequest) -> QaResult<Query> {
        if req.question.trim().is_empty() {
            return Err(QaError::empty_question());
        }
        let top_k = req.top_k.unwrap_or(self.config.top_k);
        if top_k == 0 {
            return Err(QaError::InvalidInput("top_k harus >= 1".to_string()));
        }
        let body_source = req
            .use_summary
            .map(BodySource::from_use_summary)
            .unwrap_or(self.config.body_source);

        Ok(Query {
            question: req.question.clone(),
            query_terms: query_terms(&req.question),
            top_k,
            body_source,
        })
    }

    /// Load each index and append its context blocks; empty indexes are skipped
    pub fn collect_contexts(&self, query: &Query, paths: &[PathBuf]) -> QaResult<CollectedContext> {
        let mut collected = CollectedContext::default();

        for path in paths {
            let index = self.store.load(path)?;
            let Some(structure) = index.content() else {
                debug!("Skipping {}: no structure", path.display());
                continue;
            };

            let contexts = contexts_for_structure(structure, query);
            collected.contexts.extend(contexts);
            collected.used_books.push(book_id_from_path(path));
            collected.used_index_paths.push(path.display().to_string());
        }

        Ok(collected)
    }
}

/// Flatten, score, select and render one index structure
pub fn contexts_for_structure(structure: &Structure, query: &Query) -> Vec<String> {
    let selection = select_top_k(structure.iter_nodes(), &query.query_terms, query.top_k);

    debug!(
        "Selected {} nodes (fallback={}): {:?}",
        selection.nodes.len(),
        selection.fallback,
        selection
            .nodes
            .iter()
            .map(|s| (s.node.node_id.as_deref().or(s.node.title()).unwrap_or("-"), s.score))
            .collect::<Vec<_>>()
    );

    selection
        .iter()
        .map(|node| format_node(node, query.body_source))
        .collect()
}
