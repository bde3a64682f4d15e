//! Byte-wise prefix matching.
//!
//! Comparison is over raw bytes, not UTF-8 scalar values, so a match length
//! may end in the middle of a multi-byte character.

/// Length of the shorter of two byte slices.
#[inline]
pub(crate) fn shortest_len(a: &[u8], b: &[u8]) -> usize {
    a.len().min(b.len())
}

/// Length of the longest common prefix of `a` and `b`.
#[inline]
pub(crate) fn longest_common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    let n = shortest_len(a, b);
    a[..n]
        .iter()
        .zip(&b[..n])
        .position(|(x, y)| x != y)
        .unwrap_or(n)
}
