//! Segment divider: spreads N picks across a juz range.

use rand::Rng;

/// Returns exactly `count` juz drawn from `range`, ascending.
///
/// When `count >= range.len()` the range is repeated so every juz appears
/// before any repeats. Otherwise the range is cut into `count` contiguous
/// chunks of `len / count` (the last chunk absorbs the remainder) and one juz
/// is drawn uniformly from each chunk.
pub fn divide_juz_range<R: Rng + ?Sized>(range: &[i32], count: usize, rng: &mut R) -> Vec<i32> {
    if range.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut picks: Vec<i32> = if count >= range.len() {
        range.iter().copied().cycle().take(count).collect()
    } else {
        let chunk = range.len() / count;
        (0..count)
            .map(|i| {
                let lower = i * chunk;
                let upper = if i + 1 == count { range.len() } else { lower + chunk };
                range[rng.gen_range(lower..upper)]
            })
            .collect()
    };

    picks.sort_unstable();
    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn full_range() -> Vec<i32> {
        (1..=30).collect()
    }

    #[test]
    fn test_count_at_least_range_repeats_everything_first() {
        let mut rng = StdRng::seed_from_u64(7);
        let picks = divide_juz_range(&[3, 4, 5], 7, &mut rng);
        assert_eq!(picks, vec![3, 3, 3, 4, 4, 5, 5]);
    }

    #[test]
    fn test_count_equal_to_range_is_the_range() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(divide_juz_range(&full_range(), 30, &mut rng), full_range());
    }

    #[test]
    fn test_each_pick_comes_from_its_own_chunk() {
        let range = full_range();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picks = divide_juz_range(&range, 5, &mut rng);
            assert_eq!(picks.len(), 5);
            // chunks of 6: [1..=6], [7..=12], ...
            for (i, pick) in picks.iter().enumerate() {
                let lower = (i * 6 + 1) as i32;
                assert!(
                    (lower..lower + 6).contains(pick),
                    "seed {seed}: pick {pick} outside chunk {i}"
                );
            }
        }
    }

    #[test]
    fn test_last_chunk_absorbs_remainder() {
        // 7 juz into 3 chunks of 2: [1,2], [3,4], [5,6,7]
        let range: Vec<i32> = (1..=7).collect();
        let mut saw_seven = false;
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picks = divide_juz_range(&range, 3, &mut rng);
            assert!(picks[0] <= 2);
            assert!((3..=4).contains(&picks[1]));
            assert!(picks[2] >= 5);
            saw_seven |= picks[2] == 7;
        }
        assert!(saw_seven, "remainder juz never drawn");
    }

    #[test]
    fn test_picks_are_sorted() {
        let mut rng = StdRng::seed_from_u64(42);
        let picks = divide_juz_range(&full_range(), 12, &mut rng);
        assert!(picks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(divide_juz_range(&[], 4, &mut rng).is_empty());
        assert!(divide_juz_range(&full_range(), 0, &mut rng).is_empty());
        assert_eq!(divide_juz_range(&[9], 1, &mut rng), vec![9]);
    }
}
