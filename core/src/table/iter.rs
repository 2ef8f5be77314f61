//! Iterators over table contents.

use std::iter::FusedIterator;

/// An iterator over the counts of a single sample, including zeros.
///
/// Expands the sparse entries of a [`SparseTable`](super::SparseTable) sample back into one count
/// per observation.
#[derive(Clone, Debug)]
pub struct SampleCountsIter<'a> {
    entries: &'a [(usize, u64)],
    index: usize,
    total: usize,
}

impl<'a> SampleCountsIter<'a> {
    pub(super) fn new(entries: &'a [(usize, u64)], total: usize) -> Self {
        Self {
            entries,
            index: 0,
            total,
        }
    }
}

impl<'a> Iterator for SampleCountsIter<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }

        let count = match self.entries.split_first() {
            Some((&(observation, count), rest)) if observation == self.index => {
                self.entries = rest;
                count
            }
            _ => 0,
        };
        self.index += 1;

        Some(count)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.total - self.index;
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for SampleCountsIter<'a> {}

impl<'a> FusedIterator for SampleCountsIter<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expands_sparse_entries() {
        let entries = [(1, 3), (2, 1), (5, 7)];
        let mut iter = SampleCountsIter::new(&entries, 7);

        assert_eq!(iter.len(), 7);

        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.next(), Some(1));

        assert_eq!(iter.len(), 4);

        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next(), Some(7));
        assert_eq!(iter.next(), Some(0));

        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_no_entries() {
        let iter = SampleCountsIter::new(&[], 3);

        assert_eq!(iter.collect::<Vec<_>>(), vec![0, 0, 0]);
    }
}
