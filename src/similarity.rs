//! Matching-block similarity ratio between two strings.
//!
//! The score is `2 * M / T`: `M` counts the characters covered by the
//! matching blocks found by repeatedly taking the longest common contiguous
//! run and recursing on what lies to its left and right, `T` is the summed
//! length of both inputs.
//!
//! Once the second input reaches `AUTOJUNK_MIN_LEN` characters, characters
//! making up more than 1% of it are "popular": they never start a block,
//! only extend one found through rarer characters. This keeps very long,
//! repetitive inputs from turning the block search quadratic per block.

use std::collections::HashMap;

/// Length from which popular characters are left out of the block search
pub const AUTOJUNK_MIN_LEN: usize = 200;

/// A contiguous run where `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Similarity of two (normalized) names in `[0.0, 1.0]`.
///
/// Two empty strings score 1.0; exactly one empty string scores 0.0.
/// Arguments are put in a canonical order before matching, so ties between
/// equally long blocks resolve the same way whichever side a string is on.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    let (first, second) = if a <= b { (&a, &b) } else { (&b, &a) };
    let matched: usize = matching_blocks(first, second)
        .iter()
        .map(|block| block.size)
        .sum();

    2.0 * matched as f64 / total as f64
}

/// All non-overlapping matching blocks between `a` and `b`, ordered by position.
pub fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut finder = BlockFinder::new(a, b);

    let mut blocks = Vec::new();
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let block = finder.longest_match(a_lo, a_hi, b_lo, b_hi);
        if block.size == 0 {
            continue;
        }

        if a_lo < block.a_start && b_lo < block.b_start {
            pending.push((a_lo, block.a_start, b_lo, block.b_start));
        }
        let a_end = block.a_start + block.size;
        let b_end = block.b_start + block.size;
        if a_end < a_hi && b_end < b_hi {
            pending.push((a_end, a_hi, b_end, b_hi));
        }
        blocks.push(block);
    }

    blocks.sort();
    blocks
}

/// Positions of every character of `b`, minus the popular ones on long inputs.
fn index_positions(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        positions.entry(*c).or_default().push(j);
    }

    if b.len() >= AUTOJUNK_MIN_LEN {
        let limit = b.len() / 100 + 1;
        positions.retain(|_, js| js.len() <= limit);
    }

    positions
}

/// Longest-block search state shared by every sub-range of one pair of inputs.
struct BlockFinder<'a> {
    a: &'a [char],
    b: &'a [char],
    positions: HashMap<char, Vec<usize>>,

    /// `(row, length)` of the run ending at each position of `b`; only
    /// entries stamped with the previous row are live
    runs: Vec<(usize, usize)>,
    row: usize,
}

impl<'a> BlockFinder<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        Self {
            a,
            b,
            positions: index_positions(b),
            runs: vec![(0, 0); b.len()],
            row: 0,
        }
    }

    /// Longest common run inside `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
    ///
    /// Among equally long runs the one starting earliest in `a` wins, then
    /// the one starting earliest in `b`.
    fn longest_match(
        &mut self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> MatchingBlock {
        let mut best = MatchingBlock {
            a_start: a_lo,
            b_start: b_lo,
            size: 0,
        };

        // fresh stamp so no run from an earlier search looks like the previous row
        self.row += 1;

        for i in a_lo..a_hi {
            self.row += 1;
            let previous_row = self.row - 1;

            let js = match self.positions.get(&self.a[i]) {
                Some(js) => js,
                None => continue,
            };

            for &j in js {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }

                let previous = match j.checked_sub(1) {
                    Some(prev) if self.runs[prev].0 == previous_row => self.runs[prev].1,
                    _ => 0,
                };
                let run = previous + 1;
                self.runs[j] = (self.row, run);

                if run > best.size {
                    best = MatchingBlock {
                        a_start: i + 1 - run,
                        b_start: j + 1 - run,
                        size: run,
                    };
                }
            }
        }

        if best.size > 0 {
            self.extend(&mut best, a_lo, a_hi, b_lo, b_hi);
        }
        best
    }

    /// Grow a block over equal neighbours, popular characters included.
    fn extend(
        &self,
        block: &mut MatchingBlock,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) {
        while block.a_start > a_lo
            && block.b_start > b_lo
            && self.a[block.a_start - 1] == self.b[block.b_start - 1]
        {
            block.a_start -= 1;
            block.b_start -= 1;
            block.size += 1;
        }
        while block.a_start + block.size < a_hi
            && block.b_start + block.size < b_hi
            && self.a[block.a_start + block.size] == self.b[block.b_start + block.size]
        {
            block.size += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn approx_eq(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    // ==================== Ratio Tests ====================

    #[test]
    fn test_similarity_identical() {
        assert_eq!(similarity("charonnet", "charonnet"), 1.0);
    }

    #[test]
    fn test_similarity_one_letter_differs() {
        // "henr" matches: 2 * 4 / 10
        assert!(approx_eq(similarity("henri", "henry"), 0.8));
    }

    #[test]
    fn test_similarity_disjoint() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_similarity_classic_example() {
        // "abcd" vs "bcde": block "bcd", 2 * 3 / 8
        assert!(approx_eq(similarity("abcd", "bcde"), 0.75));
    }

    #[test]
    fn test_similarity_multiple_blocks() {
        // "jean-pierre" vs "jean pierre": "jean" + "pierre"
        assert!(approx_eq(similarity("jean-pierre", "jean pierre"), 20.0 / 22.0));
    }

    #[test]
    fn test_similarity_counts_characters_not_bytes() {
        // "é" is one character on each side
        assert!(approx_eq(similarity("josé", "jose"), 0.75));
    }

    // ==================== Empty Input Tests ====================

    #[test]
    fn test_similarity_both_empty() {
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_similarity_one_empty() {
        assert_eq!(similarity("", "jean"), 0.0);
        assert_eq!(similarity("jean", ""), 0.0);
    }

    // ==================== Matching Block Tests ====================

    #[test]
    fn test_matching_blocks_ordered_and_disjoint() {
        let blocks = matching_blocks(&chars("dupont-durand"), &chars("dupond durant"));
        assert!(!blocks.is_empty());
        for pair in blocks.windows(2) {
            assert!(pair[0].a_start + pair[0].size <= pair[1].a_start);
            assert!(pair[0].b_start + pair[0].size <= pair[1].b_start);
        }
    }

    #[test]
    fn test_matching_blocks_prefers_longest_run() {
        let blocks = matching_blocks(&chars("xabcdy"), &chars("abcd"));
        assert_eq!(
            blocks,
            vec![MatchingBlock {
                a_start: 1,
                b_start: 0,
                size: 4
            }]
        );
    }

    #[test]
    fn test_matching_blocks_empty_side() {
        assert!(matching_blocks(&[], &chars("abc")).is_empty());
        assert!(matching_blocks(&chars("abc"), &[]).is_empty());
    }

    #[test]
    fn test_similarity_monotonic_in_shared_run() {
        let shorter = similarity("martin", "marxxx");
        let longer = similarity("martin", "marxin");
        assert!(longer >= shorter);
    }

    // ==================== Long Input Tests ====================

    /// `len` characters of `base`, with `marker` at every `every`-th position
    fn sprinkled(len: usize, base: char, marker: char, every: usize) -> String {
        (0..len)
            .map(|i| if i % every == 0 { marker } else { base })
            .collect()
    }

    #[test]
    fn test_long_repetitive_names_score_quickly() {
        let a = sprinkled(2_000, 'a', 'x', 7);
        let b = sprinkled(2_000, 'a', 'y', 5);

        let start = std::time::Instant::now();
        let score = similarity(&a, &b);

        assert!(start.elapsed() < std::time::Duration::from_secs(2));
        assert!((0.0..=1.0).contains(&score));
        assert_eq!(score, similarity(&b, &a));
    }

    #[test]
    fn test_long_identical_names_score_one() {
        let name = "a".repeat(2_000);
        assert_eq!(similarity(&name, &name), 1.0);
    }

    #[test]
    fn test_long_varied_names_score_quickly() {
        // mostly distinct characters, so none of them is popular
        let a: String = (0..2_000u32)
            .filter_map(|i| char::from_u32(0x4E00 + (i * 7_919) % 3_000))
            .collect();
        let b: String = a.chars().skip(10).chain("end".chars()).collect();

        let start = std::time::Instant::now();
        let score = similarity(&a, &b);

        assert!(start.elapsed() < std::time::Duration::from_secs(2));
        assert!(score > 0.9, "got {}", score);
    }

    #[test]
    fn test_popular_characters_extend_blocks() {
        // 'a' is popular in the 300-character side; "qz" seeds the block
        let b: String = format!("{}qz{}", "a".repeat(150), "a".repeat(148));
        let a = "aaqzaa";

        let blocks = matching_blocks(&chars(a), &chars(&b));
        assert_eq!(
            blocks,
            vec![MatchingBlock {
                a_start: 0,
                b_start: 148,
                size: 6
            }]
        );
    }

    #[test]
    fn test_short_inputs_keep_common_characters() {
        // below the autojunk length every character can seed a block
        let blocks = matching_blocks(&chars("aaaa"), &chars("baaaab"));
        assert_eq!(
            blocks,
            vec![MatchingBlock {
                a_start: 0,
                b_start: 1,
                size: 4
            }]
        );
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_similarity_is_symmetric(a in "[a-eé ]{0,16}", b in "[a-eé ]{0,16}") {
            prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
        }

        #[test]
        fn prop_similarity_is_bounded(a in "\\PC{0,24}", b in "\\PC{0,24}") {
            let score = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn prop_similarity_is_reflexive(a in "\\PC{0,24}") {
            prop_assert_eq!(similarity(&a, &a), 1.0);
        }
    }
}
