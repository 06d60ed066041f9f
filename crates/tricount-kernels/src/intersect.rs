//! Merge intersection of sorted neighbor slices
//!
//! Both inputs must be strictly ascending. Work is O(|a| + |b|) with two
//! forward-only cursors and no scratch storage.

use crate::common::VertexId;
use std::cmp::Ordering;

/// Number of elements common to two sorted slices
#[inline]
pub fn intersection_count(a: &[VertexId], b: &[VertexId]) -> usize {
    let mut count = 0;
    for_each_common(a, b, |_| count += 1);
    count
}

/// Call `f` for every element common to two sorted slices, in ascending order
#[inline]
pub fn for_each_common<F: FnMut(VertexId)>(a: &[VertexId], b: &[VertexId], mut f: F) {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                f(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
}

/// Prefix of a sorted slice holding only elements below `bound`
#[inline]
pub fn prefix_below(slice: &[VertexId], bound: VertexId) -> &[VertexId] {
    &slice[..slice.partition_point(|&x| x < bound)]
}
