use std::collections::HashSet;
use std::hash::Hash;

use rand::Rng;

/// Picks up to `count` distinct values from `items` without replacement.
///
/// Duplicates in `items` are collapsed first (keeping first occurrence), so the
/// result never repeats a value. When `count` covers every distinct value they
/// are all returned in their original order and `rng` is not touched.
/// Otherwise this runs a partial Fisher-Yates shuffle: exactly `count` draws,
/// each value equally likely to be picked.
pub fn sample_distinct<T, R>(items: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Copy + Eq + Hash,
    R: Rng,
{
    let mut seen = HashSet::with_capacity(items.len());
    let mut pool: Vec<T> = items.iter().copied().filter(|v| seen.insert(*v)).collect();

    if count >= pool.len() {
        return pool;
    }

    for i in 0..count {
        let j = rng.gen_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(count);
    pool
}
