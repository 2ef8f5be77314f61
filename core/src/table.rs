//! Sample-by-observation count tables.

mod id;
pub use id::{Observation, Sample};

pub mod io;

pub mod iter;
use iter::SampleCountsIter;

mod sparse;
pub use sparse::{SparseTable, TableError};

/// A read-only sample-by-observation count table.
///
/// This is the boundary between the statistics in [`crate::estimator`] and whatever backend holds
/// the counts. Implementors only need to provide the sample identifiers, an emptiness predicate,
/// and a forward iterator over each sample's counts.
pub trait Table {
    /// Iterator over the counts of a single sample.
    type Counts<'a>: Iterator<Item = u64>
    where
        Self: 'a;

    /// Returns the ordered, unique sample identifiers.
    fn samples(&self) -> &[Sample];

    /// Returns `true` if the table has no samples or no observations.
    fn is_empty(&self) -> bool;

    /// Returns the counts of the sample at `index`, one per observation and including zeros.
    ///
    /// # Panics
    ///
    /// May panic if `index` is out of bounds.
    fn sample_counts(&self, index: usize) -> Self::Counts<'_>;

    /// Returns the sum of the counts of the sample at `index`.
    ///
    /// Implementors must ensure that this sum fits in a `u64`.
    fn sample_sum(&self, index: usize) -> u64 {
        self.sample_counts(index).sum()
    }
}

impl Table for SparseTable {
    type Counts<'a> = SampleCountsIter<'a>;

    fn samples(&self) -> &[Sample] {
        SparseTable::samples(self)
    }

    fn is_empty(&self) -> bool {
        SparseTable::is_empty(self)
    }

    fn sample_counts(&self, index: usize) -> Self::Counts<'_> {
        SampleCountsIter::new(self.sample_entries(index), self.observations().len())
    }

    fn sample_sum(&self, index: usize) -> u64 {
        self.sample_entries(index).iter().map(|&(_, count)| count).sum()
    }
}
