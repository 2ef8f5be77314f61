//! Per-sample statistics underlying nonparametric richness estimators.

use std::fmt;

mod frequency;
pub use frequency::AbundanceFrequencyCount;

pub mod iter;
use iter::AbundanceFrequencyCountsIter;

use crate::table::{Sample, Table};

/// Per-sample count statistics consumed by richness estimators.
///
/// All statistics are given per sample, in table order.
pub trait RichnessStatistics {
    /// Iterator over per-sample abundance frequency counts.
    type FrequencyCounts<'a>: Iterator<Item = AbundanceFrequencyCount>
    where
        Self: 'a;

    /// Returns the number of samples.
    fn sample_count(&self) -> usize;

    /// Returns the total number of individuals in each sample.
    fn total_individual_counts(&self) -> Vec<u64>;

    /// Returns the number of observations with a non-zero count in each sample.
    fn observation_counts(&self) -> Vec<u64>;

    /// Returns a lazy iterator over the abundance frequency counts of each sample.
    ///
    /// Each call returns a new iterator starting from the first sample.
    fn abundance_frequency_counts(&self) -> Self::FrequencyCounts<'_>;
}

/// Statistics for observation richness estimation over a validated table.
///
/// Construction validates the table, after which no statistic can fail.
///
/// # Example
///
/// ```
/// use richness_core::{estimator::RichnessStatistics, Estimator, Observation, Sample, SparseTable};
///
/// let table = SparseTable::new(
///     [Sample::from("S1")],
///     [Observation::from("A"), Observation::from("B"), Observation::from("C")],
///     [vec![2, 1, 1]],
/// )?;
/// let estimator = Estimator::new(&table)?;
///
/// assert_eq!(estimator.total_individual_counts(), vec![4]);
/// assert_eq!(estimator.observation_counts(), vec![3]);
///
/// let frequencies = estimator.abundance_frequency_counts().next().unwrap();
/// assert_eq!(frequencies.as_slice(), &[2, 1, 0, 0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Estimator<'a, T> {
    table: &'a T,
}

impl<'a, T> Estimator<'a, T>
where
    T: Table,
{
    /// Creates a new estimator over a table.
    ///
    /// # Errors
    ///
    /// If the table is empty, or if any sample has no recorded individuals.
    pub fn new(table: &'a T) -> Result<Self, Error> {
        if table.is_empty() {
            return Err(Error::EmptyTable);
        }

        if let Some(index) = (0..table.samples().len()).find(|&i| table.sample_sum(i) < 1) {
            return Err(Error::EmptySample {
                sample: table.samples()[index].clone(),
            });
        }

        Ok(Self { table })
    }

    /// Returns the sample identifiers in table order.
    pub fn samples(&self) -> &'a [Sample] {
        self.table.samples()
    }

    /// Returns an iterator over the total number of individuals in each sample.
    pub fn iter_total_individual_counts(&self) -> impl Iterator<Item = u64> + 'a {
        let table = self.table;
        (0..table.samples().len()).map(move |i| table.sample_sum(i))
    }

    /// Returns an iterator over the number of observed observations in each sample.
    pub fn iter_observation_counts(&self) -> impl Iterator<Item = u64> + 'a {
        let table = self.table;
        (0..table.samples().len()).map(move |i| {
            table
                .sample_counts(i)
                .fold(0, |observed, count| observed + u64::from(count > 0))
        })
    }
}

impl<'a, T> Clone for Estimator<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Estimator<'a, T> {}

impl<'a, T> RichnessStatistics for Estimator<'a, T>
where
    T: Table,
{
    type FrequencyCounts<'b> = AbundanceFrequencyCountsIter<'b, T> where Self: 'b;

    fn sample_count(&self) -> usize {
        self.table.samples().len()
    }

    fn total_individual_counts(&self) -> Vec<u64> {
        self.iter_total_individual_counts().collect()
    }

    fn observation_counts(&self) -> Vec<u64> {
        self.iter_observation_counts().collect()
    }

    fn abundance_frequency_counts(&self) -> Self::FrequencyCounts<'_> {
        AbundanceFrequencyCountsIter::new(self.table)
    }
}

/// An error associated with constructing an [`Estimator`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The table has no samples or no observations.
    EmptyTable,
    /// A sample has no recorded individuals.
    EmptySample {
        /// The first such sample.
        sample: Sample,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyTable => f.write_str("the input table cannot be empty"),
            Error::EmptySample { sample } => write!(
                f,
                "encountered sample '{sample}' without any recorded observations"
            ),
        }
    }
}

impl std::error::Error for Error {}
