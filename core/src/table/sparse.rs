use std::fmt;

use indexmap::IndexSet;

use super::{Observation, Sample};

/// An in-memory sparse count table.
///
/// Only non-zero counts are stored, per sample and ordered by observation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SparseTable {
    samples: Vec<Sample>,
    observations: IndexSet<Observation>,
    entries: Vec<Vec<(usize, u64)>>,
}

impl SparseTable {
    /// Creates a new table from sample-major rows.
    ///
    /// Each row gives the counts of one sample, in the order of `observations`.
    ///
    /// # Errors
    ///
    /// If identifiers are duplicated, if the number or length of rows do not match the number
    /// of samples or observations, respectively, or if the counts of a sample sum past
    /// [`u64::MAX`].
    pub fn new<S, O, R>(samples: S, observations: O, rows: R) -> Result<Self, TableError>
    where
        S: IntoIterator<Item = Sample>,
        O: IntoIterator<Item = Observation>,
        R: IntoIterator<Item = Vec<u64>>,
    {
        let samples = unique_samples(samples)?;

        let mut observation_set = IndexSet::new();
        for observation in observations {
            if observation_set.contains(&observation) {
                return Err(TableError::DuplicateObservation { observation });
            }
            observation_set.insert(observation);
        }

        let rows = rows.into_iter().collect::<Vec<_>>();
        if rows.len() != samples.len() {
            return Err(TableError::RowCount {
                expected: samples.len(),
                found: rows.len(),
            });
        }

        let mut entries = Vec::with_capacity(samples.len());
        for (sample, row) in samples.iter().zip(rows) {
            if row.len() != observation_set.len() {
                return Err(TableError::SampleLength {
                    sample: sample.clone(),
                    expected: observation_set.len(),
                    found: row.len(),
                });
            }

            let sample_entries = row
                .into_iter()
                .enumerate()
                .filter(|&(_, count)| count > 0)
                .collect::<Vec<_>>();

            checked_sum(&sample_entries).ok_or_else(|| TableError::SampleOverflow {
                sample: sample.clone(),
            })?;

            entries.push(sample_entries);
        }

        Ok(Self {
            samples,
            observations: observation_set,
            entries,
        })
    }

    /// Creates a new table from observation-major rows.
    ///
    /// Each row gives an observation and its counts in the order of `samples`. This is the layout
    /// of the classic tab-separated table format.
    ///
    /// # Errors
    ///
    /// If identifiers are duplicated, if a row length does not match the number of samples, or if
    /// the counts of a sample sum past [`u64::MAX`].
    pub fn from_observation_rows<S, R>(samples: S, rows: R) -> Result<Self, TableError>
    where
        S: IntoIterator<Item = Sample>,
        R: IntoIterator<Item = (Observation, Vec<u64>)>,
    {
        let samples = unique_samples(samples)?;

        let mut observations = IndexSet::new();
        let mut entries = vec![Vec::new(); samples.len()];
        let mut sums = vec![0u64; samples.len()];

        for (observation, counts) in rows {
            if counts.len() != samples.len() {
                return Err(TableError::ObservationLength {
                    observation,
                    expected: samples.len(),
                    found: counts.len(),
                });
            }

            if observations.contains(&observation) {
                return Err(TableError::DuplicateObservation { observation });
            }
            let (index, _) = observations.insert_full(observation);

            for (i, count) in counts.into_iter().enumerate() {
                if count > 0 {
                    sums[i] = sums[i]
                        .checked_add(count)
                        .ok_or_else(|| TableError::SampleOverflow {
                            sample: samples[i].clone(),
                        })?;
                    entries[i].push((index, count));
                }
            }
        }

        Ok(Self {
            samples,
            observations,
            entries,
        })
    }

    /// Returns the count of an observation in a sample, by index.
    ///
    /// Returns `None` if either index is out of bounds.
    pub fn get(&self, sample: usize, observation: usize) -> Option<u64> {
        if observation >= self.observations.len() {
            return None;
        }

        let entries = self.entries.get(sample)?;
        Some(
            entries
                .binary_search_by_key(&observation, |&(i, _)| i)
                .map(|i| entries[i].1)
                .unwrap_or(0),
        )
    }

    /// Returns `true` if the table has no samples or no observations.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty() || self.observations.is_empty()
    }

    /// Returns the index of an observation, if present.
    pub fn observation_index(&self, observation: &Observation) -> Option<usize> {
        self.observations.get_index_of(observation)
    }

    /// Returns the observations in table order.
    pub fn observations(&self) -> &IndexSet<Observation> {
        &self.observations
    }

    /// Returns the index of a sample, if present.
    pub fn sample_index(&self, sample: &Sample) -> Option<usize> {
        self.samples.iter().position(|s| s == sample)
    }

    pub(super) fn sample_entries(&self, index: usize) -> &[(usize, u64)] {
        &self.entries[index]
    }

    /// Returns the samples in table order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

fn checked_sum(entries: &[(usize, u64)]) -> Option<u64> {
    entries
        .iter()
        .try_fold(0u64, |sum, &(_, count)| sum.checked_add(count))
}

fn unique_samples<I>(samples: I) -> Result<Vec<Sample>, TableError>
where
    I: IntoIterator<Item = Sample>,
{
    let mut set = IndexSet::new();
    for sample in samples {
        if set.contains(&sample) {
            return Err(TableError::DuplicateSample { sample });
        }
        set.insert(sample);
    }
    Ok(set.into_iter().collect())
}

/// An error associated with constructing a table.
#[derive(Debug, Eq, PartialEq)]
pub enum TableError {
    /// A sample identifier occurred more than once.
    DuplicateSample {
        /// The duplicated sample.
        sample: Sample,
    },
    /// An observation identifier occurred more than once.
    DuplicateObservation {
        /// The duplicated observation.
        observation: Observation,
    },
    /// The counts of an observation did not match the number of samples.
    ObservationLength {
        /// The observation.
        observation: Observation,
        /// The number of samples.
        expected: usize,
        /// The number of counts.
        found: usize,
    },
    /// The number of sample rows did not match the number of samples.
    RowCount {
        /// The number of samples.
        expected: usize,
        /// The number of rows.
        found: usize,
    },
    /// The counts of a sample summed past [`u64::MAX`].
    SampleOverflow {
        /// The sample.
        sample: Sample,
    },
    /// The counts of a sample did not match the number of observations.
    SampleLength {
        /// The sample.
        sample: Sample,
        /// The number of observations.
        expected: usize,
        /// The number of counts.
        found: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::DuplicateSample { sample } => write!(f, "duplicate sample '{sample}'"),
            TableError::DuplicateObservation { observation } => {
                write!(f, "duplicate observation '{observation}'")
            }
            TableError::ObservationLength {
                observation,
                expected,
                found,
            } => write!(
                f,
                "observation '{observation}' has {found} counts, expected one per sample ({expected})"
            ),
            TableError::RowCount { expected, found } => {
                write!(f, "found {found} sample rows for {expected} samples")
            }
            TableError::SampleOverflow { sample } => write!(
                f,
                "counts of sample '{sample}' sum past the largest supported total ({})",
                u64::MAX
            ),
            TableError::SampleLength {
                sample,
                expected,
                found,
            } => write!(
                f,
                "sample '{sample}' has {found} counts, expected one per observation ({expected})"
            ),
        }
    }
}

impl std::error::Error for TableError {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::table::Table;

    fn ids<T, const N: usize>(ids: [&str; N]) -> Vec<T>
    where
        T: for<'a> From<&'a str>,
    {
        ids.into_iter().map(T::from).collect()
    }

    #[test]
    fn test_new_stores_only_nonzero() {
        let table = SparseTable::new(
            ids(["S1", "S2"]),
            ids(["A", "B", "C"]),
            [vec![2, 0, 1], vec![0, 0, 5]],
        )
        .unwrap();

        assert_eq!(table.sample_entries(0), &[(0, 2), (2, 1)]);
        assert_eq!(table.sample_entries(1), &[(2, 5)]);
        assert_eq!(table.get(0, 1), Some(0));
        assert_eq!(table.get(1, 2), Some(5));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(0, 3), None);
    }

    #[test]
    fn test_from_observation_rows_transposes() {
        let table = SparseTable::from_observation_rows(
            ids(["S1", "S2"]),
            [
                (Observation::from("A"), vec![1, 0]),
                (Observation::from("B"), vec![1, 5]),
            ],
        )
        .unwrap();

        let expected = SparseTable::new(
            ids(["S1", "S2"]),
            ids(["A", "B"]),
            [vec![1, 1], vec![0, 5]],
        )
        .unwrap();

        assert_eq!(table, expected);
        assert_eq!(table.sample_counts(1).collect::<Vec<_>>(), vec![0, 5]);
        assert_eq!(table.sample_sum(1), 5);
    }

    #[test]
    fn test_duplicate_sample() {
        let result = SparseTable::new(ids(["S1", "S1"]), ids(["A"]), [vec![1], vec![1]]);

        assert_eq!(
            result,
            Err(TableError::DuplicateSample {
                sample: Sample::from("S1")
            })
        );
    }

    #[test]
    fn test_duplicate_observation() {
        let result = SparseTable::from_observation_rows(
            ids(["S1"]),
            [
                (Observation::from("A"), vec![1]),
                (Observation::from("A"), vec![2]),
            ],
        );

        assert_eq!(
            result,
            Err(TableError::DuplicateObservation {
                observation: Observation::from("A")
            })
        );
    }

    #[test]
    fn test_row_length_mismatch() {
        let result = SparseTable::new(ids(["S1"]), ids(["A", "B"]), [vec![1]]);

        assert_eq!(
            result,
            Err(TableError::SampleLength {
                sample: Sample::from("S1"),
                expected: 2,
                found: 1,
            })
        );

        let result = SparseTable::new(ids(["S1", "S2"]), ids(["A"]), [vec![1]]);

        assert_eq!(
            result,
            Err(TableError::RowCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_sample_sum_overflow() {
        let result = SparseTable::new(
            ids(["S1", "S2"]),
            ids(["A", "B"]),
            [vec![1, 1], vec![u64::MAX, 1]],
        );

        assert_eq!(
            result,
            Err(TableError::SampleOverflow {
                sample: Sample::from("S2")
            })
        );

        let result = SparseTable::from_observation_rows(
            ids(["S1", "S2"]),
            [
                (Observation::from("A"), vec![u64::MAX, 0]),
                (Observation::from("B"), vec![1, 1]),
            ],
        );

        assert_eq!(
            result,
            Err(TableError::SampleOverflow {
                sample: Sample::from("S1")
            })
        );
    }

    #[test]
    fn test_sample_sum_at_limit() {
        let table = SparseTable::from_observation_rows(
            ids(["S1"]),
            [
                (Observation::from("A"), vec![u64::MAX - 1]),
                (Observation::from("B"), vec![1]),
            ],
        )
        .unwrap();

        assert_eq!(table.sample_sum(0), u64::MAX);
    }

    #[test]
    fn test_is_empty() {
        let no_samples =
            SparseTable::new(Vec::<Sample>::new(), ids(["A"]), Vec::<Vec<u64>>::new()).unwrap();
        assert!(no_samples.is_empty());

        let no_observations = SparseTable::from_observation_rows(
            ids(["S1"]),
            Vec::<(Observation, Vec<u64>)>::new(),
        )
        .unwrap();
        assert!(no_observations.is_empty());
        assert_eq!(no_observations.sample_counts(0).count(), 0);
    }

    #[test]
    fn test_lookup_indices() {
        let table = SparseTable::new(ids(["S1", "S2"]), ids(["A", "B"]), [vec![1, 0], vec![0, 1]])
            .unwrap();

        assert_eq!(table.sample_index(&Sample::from("S2")), Some(1));
        assert_eq!(table.sample_index(&Sample::from("S3")), None);
        assert_eq!(table.observation_index(&Observation::from("B")), Some(1));
    }
}
