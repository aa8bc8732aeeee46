//! String similarity used for "did you mean" suggestions.

/// Scores how alike two strings are, from `0.0` (unrelated) to `1.0` (equal).
pub trait Similarity {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Levenshtein distance normalized by the longer string's length.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl Similarity for NormalizedLevenshtein {
    fn score(&self, a: &str, b: &str) -> f64 {
        let longest = a.chars().count().max(b.chars().count());
        if longest == 0 {
            return 1.0;
        }
        1.0 - levenshtein(a, b) as f64 / longest as f64
    }
}

/// Edit distance between `a` and `b`, counted in chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = if ca == *cb { 0 } else { 1 };
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }

    row[b.len()]
}

/// Best-scoring candidate at or above `cutoff`.
///
/// Ties keep the candidate that came first.
pub fn closest_match<'a, I>(
    similarity: &dyn Similarity,
    word: &str,
    candidates: I,
    cutoff: f64,
) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = similarity.score(word, candidate);
        if score < cutoff {
            continue;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }
    best.map(|(name, _)| name)
}
