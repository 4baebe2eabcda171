//! Parallel utilities with feature-gated implementations
//!
//! Batch elements never interact, so every batch operation is a plain map.
//! With the `native` feature the map runs on the rayon pool, otherwise it is
//! sequential. Output order always follows input order.

/// Parallel map over a slice
#[cfg(feature = "native")]
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    use rayon::prelude::*;
    data.par_iter().map(f).collect()
}

/// Sequential map (fallback when parallel is not available)
#[cfg(not(feature = "native"))]
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    data.iter().map(f).collect()
}
