// Impressionism vocabulary: category tables, prompt hints, and fallback
// combinations. All tables are process-wide constants.

/// Vocabulary category a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Artist,
    Dealer,
    Technique,
    Motif,
    Institution,
    Concept,
}

/// Known terms per category (1870–1910 Impressionism).
pub const VOCABULARY: &[(Category, &[&str])] = &[
    (
        Category::Artist,
        &[
            "Monet",
            "Renoir",
            "Morisot",
            "Manet",
            "Degas",
            "Caillebotte",
            "Sisley",
            "Pissarro",
            "Cassatt",
            "Bazille",
            "Cézanne",
            "Signac",
            "Seurat",
            "Vlaminck",
            "Guillaumin",
        ],
    ),
    (
        Category::Dealer,
        &[
            "Durand-Ruel",
            "Wildenstein",
            "Vollard",
            "Tanguy",
            "Bernheim",
            "Chocquet",
            "Ephrussi",
            "Hoschedé",
        ],
    ),
    (
        Category::Technique,
        &[
            "Pleinairmalerei",
            "Pinselstrich",
            "Lichtstimmung",
            "Lichtreflex",
            "Komplementärfarben",
            "Farbauftrag",
            "Farbtheorie",
            "Tonalismus",
        ],
    ),
    (
        Category::Motif,
        &[
            "Landschaftsmalerei",
            "Naturmotiv",
            "Wasserlandschaft",
            "Seerosenteich",
            "Boulevard",
            "Pariser Leben",
            "Ballett",
            "Theaterszene",
            "Bahnhof",
            "Flusslandschaft",
        ],
    ),
    (
        Category::Institution,
        &[
            "Salon de Paris",
            "Café Guerbois",
            "Nouvelle Athènes",
            "Salon des Refusés",
            "Impressionisten-Ausstellung",
        ],
    ),
    (
        Category::Concept,
        &[
            "Impressionismus",
            "Kunstkritik",
            "Ausstellung",
            "Schenkung",
            "Kunstmarkt",
            "Moderne",
            "Kunstjournalismus",
            "Künstlergruppe",
            "Sammlung",
            "Provenienz",
        ],
    ),
];

/// Case-insensitive category lookup for a single word.
pub fn word_category(word: &str) -> Option<Category> {
    let normalized = word.to_lowercase();
    for (category, terms) in VOCABULARY {
        if terms.iter().any(|term| term.to_lowercase() == normalized) {
            return Some(*category);
        }
    }
    None
}

/// Whether a label is already part of the base vocabulary (any category).
pub fn is_known_term(text: &str) -> bool {
    word_category(text).is_some()
}

// ── Prompt hints ──────────────────────────────────────────────────────
//
// Directional: the pair arrives in normalized word order, so (Artist,
// Technique) and (Technique, Artist) carry different hints, as in the
// original game data.

const COMBINATION_HINTS: &[((Category, Category), &str)] = &[
    (
        (Category::Artist, Category::Artist),
        "Hinweis: Beide Künstler arbeiteten zeitgleich. Nenne eine gemeinsame Technik, einen Ausstellungsort oder eine Kunstbewegung.",
    ),
    (
        (Category::Artist, Category::Technique),
        "Hinweis: Nenne eine charakteristische Malweise oder ein visuelles Merkmal dieses Künstlers.",
    ),
    (
        (Category::Technique, Category::Artist),
        "Hinweis: Nenne einen Künstler, der diese Technik perfektioniert hat oder einen innovativen Ort.",
    ),
    (
        (Category::Artist, Category::Motif),
        "Hinweis: Nenne ein Werk, einen Ort oder eine Kunstsammlung, die dieser Künstler liebte.",
    ),
    (
        (Category::Motif, Category::Artist),
        "Hinweis: Nenne einen bekannten Künstler, der dieses Motiv häufig malte.",
    ),
    (
        (Category::Dealer, Category::Artist),
        "Hinweis: Nenne eine Ausstellung oder einen wichtigen Kunstmoment zwischen diesem Händler und Künstler.",
    ),
    (
        (Category::Artist, Category::Dealer),
        "Hinweis: Nenne einen Kunsthändler, der diesen Künstler förderte oder bekannt machte.",
    ),
    (
        (Category::Institution, Category::Artist),
        "Hinweis: Nenne einen Künstler, der dort ausgestellt hat oder eine Reaktion auf die Institution.",
    ),
    (
        (Category::Artist, Category::Institution),
        "Hinweis: Nenne einen Ausstellungsort oder ein Café, das dieser Künstler besuchte.",
    ),
];

/// Hint used when either word has no known category or the pair has no
/// specific entry.
pub const DEFAULT_HINT: &str =
    "Hinweis: Kombiniere beide Begriffe zu einem authentischen Impressionismus-Konzept.";

/// Hint sentence for a word pair, keyed by the pair's categories.
pub fn combination_hint(word1: &str, word2: &str) -> &'static str {
    match (word_category(word1), word_category(word2)) {
        (Some(c1), Some(c2)) => COMBINATION_HINTS
            .iter()
            .find(|((a, b), _)| *a == c1 && *b == c2)
            .map(|(_, hint)| *hint)
            .unwrap_or(DEFAULT_HINT),
        _ => DEFAULT_HINT,
    }
}

// ── Fallback combinations ─────────────────────────────────────────────

const FALLBACK_COMBINATIONS: &[((Category, Category), (&str, &str))] = &[
    ((Category::Artist, Category::Artist), ("👥", "Künstlergruppe")),
    ((Category::Artist, Category::Technique), ("🖌️", "Pinselstrich")),
    ((Category::Artist, Category::Motif), ("🌄", "Landschaftsmalerei")),
    ((Category::Technique, Category::Motif), ("✨", "Lichtstimmung")),
    ((Category::Institution, Category::Artist), ("🏛️", "Salon de Paris")),
];

/// Global default when no category-specific fallback exists.
pub const DEFAULT_FALLBACK: (&str, &str) = ("🎨", "Impressionismus");

/// Default `(emoji, label)` for a word pair whose generation failed,
/// keyed by the pair's categories.
pub fn fallback_combination(word1: &str, word2: &str) -> (&'static str, &'static str) {
    match (word_category(word1), word_category(word2)) {
        (Some(c1), Some(c2)) => FALLBACK_COMBINATIONS
            .iter()
            .find(|((a, b), _)| *a == c1 && *b == c2)
            .map(|(_, pair)| *pair)
            .unwrap_or(DEFAULT_FALLBACK),
        _ => DEFAULT_FALLBACK,
    }
}
