//! Lazy power-set enumeration.

use std::collections::BTreeSet;
use std::iter::FusedIterator;

use crate::error::RoutingError;

/// Enumerates every subset of a finite set exactly once.
///
/// The elements are snapshotted in sorted order at construction. A bit
/// pattern of length k+1 starts at zero; each step emits the subset selected
/// by the low k bits and then increments the pattern as a binary counter.
/// The sequence ends when the overflow bit k is set, so subsets come out in
/// increasing order of the pattern they encode: the empty set first, the full
/// set last, 2^k subsets in total. The enumerator cannot be restarted.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use u_toptw::combinatorics::SubsetEnumerator;
///
/// let subsets: Vec<BTreeSet<char>> = SubsetEnumerator::new(['a', 'b']).collect();
/// assert_eq!(subsets, vec![
///     BTreeSet::new(),
///     BTreeSet::from(['a']),
///     BTreeSet::from(['b']),
///     BTreeSet::from(['a', 'b']),
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct SubsetEnumerator<T> {
    elements: Vec<T>,
    bits: Vec<bool>,
}

impl<T: Ord + Clone> SubsetEnumerator<T> {
    /// Snapshots the distinct elements of `set`.
    pub fn new<I: IntoIterator<Item = T>>(set: I) -> Self {
        let elements: Vec<T> = set.into_iter().collect::<BTreeSet<T>>().into_iter().collect();
        let bits = vec![false; elements.len() + 1];
        Self { elements, bits }
    }

    /// Snapshotted elements; bit `i` of the pattern selects `elements()[i]`.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Bit pattern of the subset the next call will emit.
    pub fn pattern(&self) -> &[bool] {
        &self.bits[..self.elements.len()]
    }

    /// Returns `true` while subsets remain.
    pub fn has_next(&self) -> bool {
        !self.bits[self.elements.len()]
    }

    /// Emits the next subset, or fails once all 2^k have been produced.
    pub fn try_next(&mut self) -> Result<BTreeSet<T>, RoutingError> {
        if !self.has_next() {
            return Err(RoutingError::EndOfSequence);
        }
        let subset = self
            .elements
            .iter()
            .zip(&self.bits)
            .filter(|&(_, &selected)| selected)
            .map(|(e, _)| e.clone())
            .collect();
        for bit in self.bits.iter_mut() {
            if !*bit {
                *bit = true;
                break;
            }
            *bit = false;
        }
        Ok(subset)
    }

    /// Subsets left, or `None` if the count does not fit in a `usize`.
    ///
    /// With pattern value v, 2^k - v equals the complement of v over k bits
    /// plus one.
    fn remaining(&self) -> Option<usize> {
        if !self.has_next() {
            return Some(0);
        }
        let width = usize::BITS as usize;
        let pattern = self.pattern();
        if pattern.iter().skip(width).any(|&b| !b) {
            return None;
        }
        pattern
            .iter()
            .take(width)
            .enumerate()
            .filter(|&(_, &b)| !b)
            .fold(0usize, |acc, (i, _)| acc | (1 << i))
            .checked_add(1)
    }
}

impl<T: Ord + Clone> Iterator for SubsetEnumerator<T> {
    type Item = BTreeSet<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(n) => (n, Some(n)),
            // more than usize::MAX subsets remain
            None => (usize::MAX, None),
        }
    }
}

impl<T: Ord + Clone> FusedIterator for SubsetEnumerator<T> {}
