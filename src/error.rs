//! Error taxonomy surfaced to callers of the engine

use thiserror::Error;

pub type QaResult<T> = std::result::Result<T, QaError>;

#[derive(Error, Debug)]
pub enum QaError {
    /// Caller input rejected before any index is read
    #[error("{0}")]
    InvalidInput(String),

    /// A named index or book does not resolve to a file
    #[error("{0}")]
    NotFound(String),

    /// Every resolved index was structurally empty
    #[error("Konteks tidak ditemukan")]
    NoContent,

    #[error("Gagal membaca index {path}: {source}")]
    IndexLoad {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// Generation service failure, passed through untouched
    #[error("Generation failed: {0:#}")]
    Upstream(#[source] anyhow::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl QaError {
    pub fn empty_question() -> Self {
        QaError::InvalidInput("Pertanyaan tidak boleh kosong".to_string())
    }

    pub fn index_not_found(what: impl std::fmt::Display) -> Self {
        QaError::NotFound(format!("Index tidak ditemukan: {}", what))
    }

    pub fn no_index() -> Self {
        QaError::NotFound("Belum ada index".to_string())
    }
}
