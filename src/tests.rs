//! End-to-end tests for ContextEngine

use crate::*;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Engine over a temp results dir, returning the mock so prompts can be inspected
fn engine_with(dir: &TempDir, answer: &str) -> (SharedContextEngine, Arc<MockGenerator>) {
    let mock = Arc::new(MockGenerator::new(answer));
    let config = QaConfig::default().with_results_dir(dir.path());
    let engine = ContextEngine::new(Box::new(SharedMock(mock.clone())), config);
    (engine, mock)
}

/// Lets a test keep a handle on the generator the engine owns
struct SharedMock(Arc<MockGenerator>);

#[async_trait::async_trait]
impl AnswerGenerator for SharedMock {
    fn name(&self) -> &'static str {
        "shared_mock"
    }

    async fn generate(&self, model: &str, prompt: &str) -> anyhow::Result<String> {
        self.0.generate(model, prompt).await
    }
}

fn write_index(dir: &TempDir, book_id: &str, json: serde_json::Value) -> PathBuf {
    let path = dir.path().join(format!("{}_structure.json", book_id));
    fs::write(&path, json.to_string()).unwrap();
    path
}

fn ask(question: &str) -> AskRequest {
    AskRequest {
        question: question.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_scenario_single_best_node() {
    let dir = TempDir::new().unwrap();
    write_index(
        &dir,
        "hewan",
        serde_json::json!({"structure": [
            {"title": "Intro", "text": "cats are mammals"},
            {"title": "Fish", "text": "fish live in water"}
        ]}),
    );
    let (engine, mock) = engine_with(&dir, "Kucing adalah mamalia.");

    let response = engine
        .answer(AskRequest {
            top_k: Some(1),
            ..ask("what are cats")
        })
        .await
        .unwrap();

    assert_eq!(response.answer, "Kucing adalah mamalia.");
    assert_eq!(response.used_books, vec!["hewan"]);

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    let (model, prompt) = &calls[0];
    assert_eq!(model, config::DEFAULT_MODEL);
    assert!(prompt.contains("Judul: Intro"));
    assert!(!prompt.contains("Judul: Fish"));
    assert!(prompt.contains("PERTANYAAN: what are cats"));
}

#[tokio::test]
async fn test_scenario_blank_question_reads_nothing() {
    let dir = TempDir::new().unwrap();
    let (engine, mock) = engine_with(&dir, "x");

    // A path that does not exist would be NotFound if resolution ran first
    let err = engine
        .answer(AskRequest {
            index_paths: Some(vec!["/no/such/index.json".to_string()]),
            ..ask(" \t\n ")
        })
        .await
        .unwrap_err();

    assert!(matches!(err, QaError::InvalidInput(_)));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_scenario_empty_index_is_skipped() {
    let dir = TempDir::new().unwrap();
    write_index(&dir, "kosong", serde_json::json!({"structure": []}));
    write_index(
        &dir,
        "isi",
        serde_json::json!({"structure": {"title": "Fotosintesis", "summary": "proses tumbuhan membuat makanan"}}),
    );
    let (engine, _mock) = engine_with(&dir, "ok");

    let response = engine.answer(ask("apa itu fotosintesis")).await.unwrap();
    assert_eq!(response.used_books, vec!["isi"]);
    assert_eq!(response.used_index_paths.len(), 1);
    assert!(response.used_index_paths[0].ends_with("isi_structure.json"));
}

#[tokio::test]
async fn test_scenario_no_match_falls_back() {
    let dir = TempDir::new().unwrap();
    write_index(
        &dir,
        "buku",
        serde_json::json!({"structure": [
            {"title": "Satu", "text": "alpha", "nodes": [{"title": "Satu.A", "text": "beta"}]},
            {"title": "Dua", "text": "gamma"},
            {"title": "Tiga", "text": "delta"}
        ]}),
    );
    let (engine, mock) = engine_with(&dir, "tidak ada di konteks");

    let response = engine.answer(ask("zzzz qqqq")).await.unwrap();
    assert_eq!(response.answer, "tidak ada di konteks");

    let prompt = &mock.calls()[0].1;
    let satu = prompt.find("Judul: Satu\n").unwrap();
    let child = prompt.find("Judul: Satu.A").unwrap();
    let dua = prompt.find("Judul: Dua").unwrap();
    assert!(satu < child && child < dua);
    assert!(!prompt.contains("Judul: Tiga"));
}

#[tokio::test]
async fn test_all_indexes_empty_is_no_content() {
    let dir = TempDir::new().unwrap();
    write_index(&dir, "a", serde_json::json!({"structure": null}));
    write_index(&dir, "b", serde_json::json!({"doc_name": "b"}));
    let (engine, mock) = engine_with(&dir, "x");

    let err = engine.answer(ask("apa saja")).await.unwrap_err();
    assert!(matches!(err, QaError::NoContent));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_bare_nodes_still_give_context() {
    let dir = TempDir::new().unwrap();
    write_index(
        &dir,
        "a",
        serde_json::json!({"structure": [{"start_index": 1, "end_index": 4}]}),
    );
    let (engine, mock) = engine_with(&dir, "ok");

    let response = engine.answer(ask("apa")).await.unwrap();
    assert_eq!(response.used_books, vec!["a"]);

    let prompt = &mock.calls()[0].1;
    assert!(prompt.contains("KONTEKS:\nJudul: (Tanpa judul)\nIsi: \n\n"));
}

#[tokio::test]
async fn test_falsy_structure_skipped_across_indexes() {
    let dir = TempDir::new().unwrap();
    write_index(&dir, "a", serde_json::json!({"structure": ""}));
    write_index(&dir, "b", serde_json::json!({"structure": {"title": "Bab"}}));
    write_index(&dir, "c", serde_json::json!({"structure": false}));
    let (engine, _mock) = engine_with(&dir, "ok");

    let response = engine
        .answer(AskRequest {
            books: Some(vec!["a".into(), "b".into(), "c".into()]),
            ..ask("bab")
        })
        .await
        .unwrap();
    assert_eq!(response.used_books, vec!["b"]);
}

#[tokio::test]
async fn test_top_k_applies_per_index() {
    let dir = TempDir::new().unwrap();
    let nodes = serde_json::json!({"structure": [
        {"title": "a1", "text": "kata"},
        {"title": "a2", "text": "kata"},
        {"title": "a3", "text": "kata"}
    ]});
    write_index(&dir, "satu", nodes.clone());
    write_index(&dir, "dua", nodes);
    let (engine, mock) = engine_with(&dir, "ok");

    let response = engine
        .answer(AskRequest {
            top_k: Some(2),
            books: Some(vec!["satu".into(), "dua".into()]),
            ..ask("kata")
        })
        .await
        .unwrap();

    assert_eq!(response.used_books, vec!["satu", "dua"]);
    let prompt = &mock.calls()[0].1;
    assert_eq!(prompt.matches("Judul: ").count(), 4);
    assert_eq!(prompt.matches("\n\n---\n\n").count(), 3);
}

#[tokio::test]
async fn test_request_overrides_model_and_body_source() {
    let dir = TempDir::new().unwrap();
    write_index(
        &dir,
        "buku",
        serde_json::json!({"structure": {"title": "Bab", "summary": "ringkasan", "text": "teks lengkap", "page_num": 4}}),
    );
    let (engine, mock) = engine_with(&dir, "ok");

    engine
        .answer(AskRequest {
            model: Some("gpt-4o-mini".into()),
            use_summary: Some(false),
            ..ask("bab")
        })
        .await
        .unwrap();

    let (model, prompt) = &mock.calls()[0];
    assert_eq!(model, "gpt-4o-mini");
    assert!(prompt.contains("Judul: Bab\nHalaman: 4\nIsi: teks lengkap"));
}

#[tokio::test]
async fn test_upstream_error_is_propagated() {
    let dir = TempDir::new().unwrap();
    write_index(&dir, "buku", serde_json::json!({"structure": {"title": "x"}}));
    let config = QaConfig::default().with_results_dir(dir.path());
    let engine = ContextEngine::new(Box::new(MockGenerator::failing("rate limited")), config);

    let err = engine.answer(ask("x")).await.unwrap_err();
    match err {
        QaError::Upstream(e) => assert_eq!(e.to_string(), "rate limited"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_zero_top_k_rejected() {
    let dir = TempDir::new().unwrap();
    let (engine, _) = engine_with(&dir, "x");
    let err = engine
        .answer(AskRequest {
            top_k: Some(0),
            ..ask("apa")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, QaError::InvalidInput(_)));
}

#[tokio::test]
async fn test_no_indexes_available() {
    let dir = TempDir::new().unwrap();
    let (engine, _) = engine_with(&dir, "x");
    let err = engine.answer(ask("apa")).await.unwrap_err();
    assert_eq!(err.to_string(), "Belum ada index");
}
