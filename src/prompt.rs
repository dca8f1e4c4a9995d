// Prompt construction for the generation model.

use crate::vocabulary::combination_hint;

/// Build the instruction prompt for combining two normalized words.
///
/// The model is constrained to a single `EMOJI,Begriff` output line; the
/// few-shot block covers every vocabulary category, and the hint sentence
/// is selected from the category pair of the two inputs.
pub fn build_prompt(word1: &str, word2: &str) -> String {
    let context = combination_hint(word1, word2);

    format!(
        "Du kombinierst zwei Begriffe aus dem Impressionismus (1870–1910) und gibst EXAKT ein Ergebnis im Format: EMOJI,Begriff\n\
        \n\
        Regeln:\n\
        - Nur EINE Zeile ausgeben\n\
        - Format: [emoji],[deutscher Begriff]\n\
        - Keine Erklärungen, Sätze oder Kommas im Begriff\n\
        - Nur authentische Begriffe aus der echten Kunstgeschichte\n\
        - Nicht die Eingabewörter wiederholen\n\
        \n\
        Beispiele:\n\
        🎨,Monet\n\
        👩‍🎨,Morisot\n\
        🖼️,Pleinairmalerei\n\
        ✨,Lichtstimmung\n\
        🌄,Landschaftsmalerei\n\
        💬,Kunstkritik\n\
        🏛️,Salon de Paris\n\
        🧑‍💼,Durand-Ruel\n\
        🏺,Wildenstein\n\
        🖌️,Pinselstrich\n\
        🌿,Naturmotiv\n\
        👤,Caillebotte\n\
        🗞️,Kunstjournalismus\n\
        ☕,Café Guerbois\n\
        🌊,Wasserlandschaft\n\
        \n\
        {context}\n\
        \n\
        Kombiniere: '{word1}' + '{word2}'\n\
        Ausgabe (NUR EMOJI,Begriff):"
    )
}
