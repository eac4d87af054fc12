//! Closest-id suggestions for ids the player mistyped.

use strsim::jaro_winkler;

/// Minimum similarity for a suggestion (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.75;

/// The candidate most similar to `input`, if any is close enough.
///
/// An exact (case-insensitive) match is never suggested back.
pub fn closest<'a>(input: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let input_lower = input.to_lowercase();
    candidates
        .into_iter()
        .filter(|c| !c.eq_ignore_ascii_case(&input_lower))
        .map(|c| (c, jaro_winkler(&input_lower, &c.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(c, _)| c.to_string())
}
