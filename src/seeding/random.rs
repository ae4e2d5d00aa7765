// ABOUTME: Random selection helpers over an injectable random source
// ABOUTME: Uniform picks from pools, bounded ranges, percentages and past timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::{AppError, AppResult};

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Uniform pick from a pool
///
/// # Errors
///
/// Returns `InternalError` when the pool is empty
pub fn pick<'a, T, R>(rng: &mut R, pool: &'a [T]) -> AppResult<&'a T>
where
    R: Rng + ?Sized,
{
    pool.choose(rng)
        .ok_or_else(|| AppError::internal("cannot pick from an empty pool"))
}

/// Up to `count` distinct entries of a pool, in random order
pub fn pick_distinct<'a, T, R>(rng: &mut R, pool: &'a [T], count: usize) -> Vec<&'a T>
where
    R: Rng + ?Sized,
{
    pool.choose_multiple(rng, count).collect()
}

/// Inclusive range draw
pub fn between<R: Rng + ?Sized>(rng: &mut R, low: u32, high: u32) -> u32 {
    rng.gen_range(low..=high.max(low))
}

/// True with the given percentage
pub fn percent<R: Rng + ?Sized>(rng: &mut R, percentage: u32) -> bool {
    rng.gen_ratio(percentage.min(100), 100)
}

/// Timestamp between `low` and `high` whole days before `now`
pub fn days_ago<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    low: u32,
    high: u32,
) -> DateTime<Utc> {
    now - Duration::days(i64::from(between(rng, low, high)))
}

/// Uppercase alphanumeric code
pub fn alphanumeric_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pick_from_empty_pool_is_an_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let empty: [u32; 0] = [];
        assert!(pick(&mut rng, &empty).is_err());
    }

    #[test]
    fn test_pick_distinct_never_repeats() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let pool = [1, 2, 3, 4, 5];
        let picked = pick_distinct(&mut rng, &pool, 4);
        let mut unique: Vec<_> = picked.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(picked.len(), 4);
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_between_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let value = between(&mut rng, 3, 8);
            assert!((3..=8).contains(&value));
        }
        assert_eq!(between(&mut rng, 5, 5), 5);
    }

    #[test]
    fn test_code_uses_uppercase_alphanumerics() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let code = alphanumeric_code(&mut rng, 8);
        assert_eq!(code.len(), 8);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_days_ago_is_in_the_past() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let now = Utc::now();
        let stamp = days_ago(&mut rng, now, 1, 30);
        assert!(stamp <= now - Duration::days(1));
        assert!(stamp >= now - Duration::days(30));
    }
}
