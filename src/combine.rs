// One combine request: normalize, cache lookup, generation, fallback,
// label dedup, persist.

use crate::db::Database;
use crate::generate::Generator;
use crate::metrics;
use crate::prompt::build_prompt;
use crate::vocabulary::{fallback_combination, is_known_term};

/// Result of one combine request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineOutcome {
    pub message: &'static str,
    pub emoji: String,
    pub text: String,
    /// True only when this request created the record.
    pub discovered: bool,
}

/// Lower-case both words and order them lexicographically, so a pair is
/// addressable regardless of argument order.
pub fn normalize_pair(a: &str, b: &str) -> (String, String) {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Combine two elements.
///
/// A known pair or an already-used label terminates without creating
/// anything (`discovered: false`). Generation failure is resolved by the
/// category-keyed fallback, never surfaced as an error; only persistence
/// failures propagate.
pub async fn combine_elements(
    db: &Database,
    generator: &dyn Generator,
    raw_word1: &str,
    raw_word2: &str,
) -> Result<CombineOutcome, sqlx::Error> {
    let (word1, word2) = normalize_pair(raw_word1, raw_word2);

    if let Some(existing) = db.find_by_pair(&word1, &word2).await? {
        metrics::COMBINATIONS_TOTAL
            .with_label_values(&["pair_hit"])
            .inc();
        return Ok(CombineOutcome {
            message: "Element already exists",
            emoji: existing.emoji,
            text: existing.text,
            discovered: false,
        });
    }

    tracing::info!("generating combination for {word1} + {word2}");
    let prompt = build_prompt(&word1, &word2);

    let (emoji, text, from_fallback) = match generator.generate(&prompt).await {
        Some(combination) => (combination.emoji, combination.text, false),
        None => {
            let (emoji, label) = fallback_combination(&word1, &word2);
            tracing::warn!("using fallback for {word1} + {word2}: {label}");
            (emoji.to_string(), label.to_lowercase(), true)
        }
    };

    // Labels are a secondary uniqueness key: a pair resolving to an
    // already-used label reuses that record.
    if let Some(existing) = db.find_by_text(&text).await? {
        metrics::COMBINATIONS_TOTAL
            .with_label_values(&["text_hit"])
            .inc();
        return Ok(CombineOutcome {
            message: "Text already exists",
            emoji: existing.emoji,
            text: existing.text,
            discovered: false,
        });
    }

    if !is_known_term(&text) {
        tracing::info!("new term discovered outside base vocabulary: {text}");
    }

    let element = db.create_element(&word1, &word2, &emoji, &text).await?;
    metrics::COMBINATIONS_TOTAL
        .with_label_values(&[if from_fallback {
            "created_fallback"
        } else {
            "created"
        }])
        .inc();
    metrics::ELEMENTS_DISCOVERED.inc();
    tracing::info!("created element {} {}", element.emoji, element.text);

    Ok(CombineOutcome {
        message: if from_fallback {
            "Element created with fallback"
        } else {
            "New element created"
        },
        emoji: element.emoji,
        text: element.text,
        discovered: true,
    })
}
