//! Aggregate Computations
//!
//! Whole-column statistics used by the query handlers. Every aggregate
//! over an empty input reports `None`; the handlers turn that into a
//! typed [`QueryError::EmptyTable`](crate::QueryError::EmptyTable).

use std::cmp::Ordering;

/// Arithmetic mean, ignoring missing and non-finite observations
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Smallest and largest item
pub fn span<'a, T, I>(values: I) -> Option<(&'a T, &'a T)>
where
    T: Ord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((if v < lo { v } else { lo }, if v > hi { v } else { hi })),
    })
}

/// Rows ordered newest first by `key`, keeping input order among ties
pub fn most_recent<'a, T, K, F>(rows: &'a [T], n: usize, key: F) -> Vec<&'a T>
where
    K: Ord,
    F: Fn(&T) -> &K,
{
    let mut sorted: Vec<&T> = rows.iter().collect();
    sorted.sort_by(|a, b| descending(key(a), key(b)));
    sorted.truncate(n);
    sorted
}

/// Newest row by `key`; the earliest such row in input order on ties
pub fn latest<'a, T, K, F>(rows: &'a [T], key: F) -> Option<&'a T>
where
    K: Ord,
    F: Fn(&T) -> &K,
{
    most_recent(rows, 1, key).into_iter().next()
}

fn descending<K: Ord>(a: &K, b: &K) -> Ordering {
    b.cmp(a)
}
