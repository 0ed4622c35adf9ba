//! Edit-distance similarity ratio.
//!
//! Leaf utility, independent of the worksheet-walking code so it can be
//! tested on its own. Case handling is the caller's business; the ratio
//! itself is exact.

/// Normalized similarity between two strings in `[0, 100]`; 100 means
/// identical. Computed as `100 * (1 - levenshtein / max_len)`, rounded to
/// the nearest integer.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let max_len = a.len().max(b.len());
    let dist = levenshtein(&a, &b);
    // dist <= max_len always holds, so the ratio stays in range.
    (((max_len - dist) as f64 / max_len as f64) * 100.0).round() as u8
}

/// Classic single-cost Levenshtein distance over chars, two-row DP.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identity_is_100() {
        assert_eq!(ratio("alice@test.com", "alice@test.com"), 100);
        assert_eq!(ratio("", ""), 100);
    }

    #[test]
    fn disjoint_is_0() {
        assert_eq!(ratio("abc", "xyz"), 0);
        assert_eq!(ratio("", "anything"), 0);
    }

    #[test]
    fn one_char_typo_clears_ninety() {
        // Missing 'e': distance 1 over 14 chars -> 93.
        assert_eq!(ratio("alice@test.com", "alice@tst.com"), 93);
        assert!(ratio("alice@test.com", "alice@tst.com") >= 90);
    }

    #[test]
    fn different_local_part_stays_below_ninety() {
        assert!(ratio("alice@test.com", "bob@test.com") < 90);
    }

    #[test]
    fn case_matters_at_this_layer() {
        // The reconciler lowercases before calling; the leaf stays exact.
        assert!(ratio("A@B.com", "a@b.com") < 100);
    }

    #[test]
    fn multibyte_chars_count_as_single_edits() {
        assert_eq!(ratio("héllo", "hello"), 80);
    }

    proptest! {
        #[test]
        fn ratio_is_symmetric(a in ".{0,40}", b in ".{0,40}") {
            prop_assert_eq!(ratio(&a, &b), ratio(&b, &a));
        }

        #[test]
        fn ratio_is_bounded(a in ".{0,40}", b in ".{0,40}") {
            prop_assert!(ratio(&a, &b) <= 100);
        }

        #[test]
        fn ratio_identity(a in ".{0,40}") {
            prop_assert_eq!(ratio(&a, &a), 100);
        }
    }
}
