// Integration tests for the combine request flow: normalization, pair and
// label caching, fallback selection, and persistence.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use atelier_backend::combine::combine_elements;
use atelier_backend::db::Database;
use atelier_backend::generate::Generator;
use atelier_backend::parse::Combination;

/// Generator stub that replays a scripted sequence of results and counts
/// how often it was called.
struct ScriptedGenerator {
    responses: Mutex<VecDeque<Option<Combination>>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn new(responses: Vec<Option<Combination>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Option<Combination> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses.lock().unwrap().pop_front().flatten()
    }
}

fn combination(emoji: &str, text: &str) -> Option<Combination> {
    Some(Combination {
        emoji: emoji.to_string(),
        text: text.to_string(),
    })
}

async fn test_db() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

#[tokio::test]
async fn test_new_pair_is_generated_and_persisted() {
    let db = test_db().await;
    let generator = ScriptedGenerator::new(vec![combination("🌊", "wasserlandschaft")]);

    let outcome = combine_elements(&db, generator.as_ref(), "Monet", "wasser")
        .await
        .unwrap();

    assert_eq!(outcome.message, "New element created");
    assert_eq!(outcome.emoji, "🌊");
    assert_eq!(outcome.text, "wasserlandschaft");
    assert!(outcome.discovered);

    let stored = db.find_by_pair("monet", "wasser").await.unwrap().unwrap();
    assert_eq!(stored.text, "wasserlandschaft");
}

#[tokio::test]
async fn test_repeated_request_is_cache_hit_without_generation() {
    let db = test_db().await;
    let generator = ScriptedGenerator::new(vec![combination("🌊", "wasserlandschaft")]);

    let first = combine_elements(&db, generator.as_ref(), "Monet", "wasser")
        .await
        .unwrap();
    assert!(first.discovered);

    let second = combine_elements(&db, generator.as_ref(), "Monet", "wasser")
        .await
        .unwrap();
    assert_eq!(second.message, "Element already exists");
    assert_eq!(second.text, "wasserlandschaft");
    assert!(!second.discovered);

    // One record, one generation call across both requests.
    assert_eq!(db.list_elements().await.unwrap().len(), 1);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_combination_is_commutative() {
    let db = test_db().await;
    let generator = ScriptedGenerator::new(vec![combination("🌊", "wasserlandschaft")]);

    combine_elements(&db, generator.as_ref(), "Monet", "wasser")
        .await
        .unwrap();
    let reversed = combine_elements(&db, generator.as_ref(), "wasser", "Monet")
        .await
        .unwrap();

    assert!(!reversed.discovered);
    assert_eq!(reversed.text, "wasserlandschaft");
    assert_eq!(generator.calls(), 1);
    assert_eq!(db.list_elements().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_label_reuses_existing_record() {
    let db = test_db().await;
    let generator = ScriptedGenerator::new(vec![
        combination("🌊", "wasserlandschaft"),
        combination("🏞️", "wasserlandschaft"),
    ]);

    let first = combine_elements(&db, generator.as_ref(), "Monet", "wasser")
        .await
        .unwrap();
    assert!(first.discovered);

    let second = combine_elements(&db, generator.as_ref(), "Renoir", "Seine")
        .await
        .unwrap();
    assert_eq!(second.message, "Text already exists");
    assert!(!second.discovered);
    // The first pair's emoji wins; no new record is created.
    assert_eq!(second.emoji, "🌊");
    assert_eq!(db.list_elements().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_generation_failure_uses_category_fallback() {
    let db = test_db().await;
    let generator = ScriptedGenerator::new(vec![None]);

    // Both artists: the artist-pair fallback applies.
    let outcome = combine_elements(&db, generator.as_ref(), "Monet", "Renoir")
        .await
        .unwrap();

    assert_eq!(outcome.message, "Element created with fallback");
    assert_eq!(outcome.emoji, "👥");
    assert_eq!(outcome.text, "künstlergruppe");
    assert!(outcome.discovered);
}

#[tokio::test]
async fn test_generation_failure_uses_global_default_for_unknown_words() {
    let db = test_db().await;
    let generator = ScriptedGenerator::new(vec![None]);

    let outcome = combine_elements(&db, generator.as_ref(), "feuer", "wasser")
        .await
        .unwrap();

    assert_eq!(outcome.message, "Element created with fallback");
    assert_eq!(outcome.emoji, "🎨");
    assert_eq!(outcome.text, "impressionismus");
    assert!(outcome.discovered);
}

#[tokio::test]
async fn test_fallback_path_respects_label_uniqueness() {
    let db = test_db().await;
    let generator = ScriptedGenerator::new(vec![combination("🎭", "künstlergruppe"), None]);

    // First pair claims the label through generation.
    let first = combine_elements(&db, generator.as_ref(), "Degas", "Manet")
        .await
        .unwrap();
    assert!(first.discovered);

    // Second artist pair falls back to the same label and must reuse the
    // existing record instead of creating a duplicate.
    let second = combine_elements(&db, generator.as_ref(), "Monet", "Renoir")
        .await
        .unwrap();
    assert_eq!(second.message, "Text already exists");
    assert!(!second.discovered);
    assert_eq!(second.emoji, "🎭");
    assert_eq!(db.list_elements().await.unwrap().len(), 1);
}
