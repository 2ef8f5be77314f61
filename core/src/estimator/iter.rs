//! Lazy per-sample iteration.

use std::iter::FusedIterator;

use crate::table::Table;

use super::AbundanceFrequencyCount;

/// An iterator over the abundance frequency counts of each sample in a table.
///
/// Frequencies are computed on demand, one sample at a time, so that only a single sample's
/// abundance frequency count is held in memory by the iterator.
#[derive(Debug)]
pub struct AbundanceFrequencyCountsIter<'a, T> {
    table: &'a T,
    index: usize,
    total: usize,
}

impl<'a, T> AbundanceFrequencyCountsIter<'a, T>
where
    T: Table,
{
    pub(super) fn new(table: &'a T) -> Self {
        Self {
            table,
            index: 0,
            total: table.samples().len(),
        }
    }
}

impl<'a, T> Iterator for AbundanceFrequencyCountsIter<'a, T>
where
    T: Table,
{
    type Item = AbundanceFrequencyCount;

    fn next(&mut self) -> Option<Self::Item> {
        (self.index < self.total).then(|| {
            self.index += 1;
            AbundanceFrequencyCount::from_counts(self.table.sample_counts(self.index - 1))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.total - self.index;
        (len, Some(len))
    }
}

impl<'a, T> ExactSizeIterator for AbundanceFrequencyCountsIter<'a, T> where T: Table {}

impl<'a, T> FusedIterator for AbundanceFrequencyCountsIter<'a, T> where T: Table {}
