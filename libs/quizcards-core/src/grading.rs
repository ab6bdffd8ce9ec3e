//! Answer grading for quiz sessions.

/// Grade a raw typed answer against a card's stored answer.
///
/// Both sides are trimmed. If both parse as numbers the comparison is
/// numeric, so "42.0" matches "42"; otherwise the trimmed strings are
/// compared case-insensitively.
pub fn grade_answer(raw_input: &str, stored_answer: &str) -> bool {
    let input = raw_input.trim();
    let stored = stored_answer.trim();

    match (input.parse::<f64>(), stored.parse::<f64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => input.to_lowercase() == stored.to_lowercase(),
    }
}
