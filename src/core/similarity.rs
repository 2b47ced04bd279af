/// Points contributed by each provider skill found in the request text
const KEYWORD_MATCH_POINTS: f64 = 0.2;

/// Calculate the cosine similarity between two embedding vectors
///
/// # Returns
/// `None` when the vectors are empty, differ in length, or overflow to a
/// non-finite result. A zero-magnitude vector yields `Some(0.0)`. The result
/// is not clamped and lies in `[-1, 1]`.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let magnitude = norm_a.sqrt() * norm_b.sqrt();
    if magnitude == 0.0 {
        return Some(0.0);
    }

    let similarity = dot / magnitude;
    similarity.is_finite().then_some(similarity)
}

/// Score how many skills appear verbatim in a block of text
///
/// Matching is a case-insensitive substring test, so the skill `plumb`
/// matches "plumber" but `plumbing` does not. Each hit is worth 0.2,
/// capped at 1.0.
pub fn keyword_overlap(text: &str, skills: &[String]) -> f64 {
    let haystack = text.to_lowercase();
    let matches = skills
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .count();

    (matches as f64 * KEYWORD_MATCH_POINTS).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = [0.3_f32, 0.4, 0.5];
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_vectors_are_negative() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 2.0]).unwrap();
        assert!(sim.abs() < 1e-9);
    }

    #[test]
    fn test_mismatched_lengths() {
        assert!(cosine_similarity(&[1.0, 0.0], &[1.0]).is_none());
        assert!(cosine_similarity(&[], &[]).is_none());
    }

    #[test]
    fn test_overflowing_components() {
        // 1e39 does not fit in an f32 and becomes infinity
        let a = [1e39_f64 as f32, 1.0];
        let b = [1e39_f64 as f32, 2.0];
        assert!(cosine_similarity(&a, &b).is_none());
    }

    #[test]
    fn test_zero_magnitude() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), Some(0.0));
    }

    #[test]
    fn test_keyword_overlap_is_case_insensitive() {
        let skills = vec!["Plumber".to_string(), "electrical".to_string()];
        let score = keyword_overlap("Need a PLUMBER for the sink", &skills);
        assert!((score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_overlap_caps_at_one() {
        let skills: Vec<String> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(keyword_overlap("abcdef", &skills), 1.0);
    }
}
