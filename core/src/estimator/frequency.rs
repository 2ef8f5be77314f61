use std::{collections::BTreeMap, ops::Deref};

/// The abundance frequency count of a single sample.
///
/// For a sample with `N` individuals, this holds `N` frequencies, where the frequency at
/// abundance `k` (for `k` in `1..=N`) is the number of observations counted exactly `k` times.
/// Observations with a count of zero do not contribute to any frequency.
///
/// Slice access through [`Deref`] is zero-indexed, so that `self[k - 1]` is the frequency at
/// abundance `k`. Prefer [`AbundanceFrequencyCount::frequency`] for lookup by abundance.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct AbundanceFrequencyCount(Vec<u64>);

impl AbundanceFrequencyCount {
    /// Returns the frequencies as a slice.
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Creates the abundance frequency count of a sample from its observation counts.
    ///
    /// The counts are consumed in a single pass. Only the distinct abundances are held while
    /// counting, and the histogram is allocated once at its final length.
    ///
    /// # Panics
    ///
    /// If the counts sum past [`u64::MAX`]. Tables built through [`crate::SparseTable`] reject
    /// such samples on construction.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let mut total = 0u64;
        let mut abundances = BTreeMap::new();

        for count in counts.into_iter().filter(|&count| count > 0) {
            total = total
                .checked_add(count)
                .expect("sample counts overflowed u64");

            *abundances.entry(count).or_insert(0u64) += 1;
        }

        let mut frequencies = vec![0; total as usize];
        for (abundance, frequency) in abundances {
            // No abundance can exceed the total
            frequencies[abundance as usize - 1] = frequency;
        }

        Self(frequencies)
    }

    /// Returns the number of observations counted exactly `abundance` times.
    ///
    /// Returns `None` if `abundance` is zero or exceeds the number of individuals.
    pub fn frequency(&self, abundance: usize) -> Option<u64> {
        abundance
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .copied()
    }

    /// Returns the number of individuals, i.e. the sum of every abundance times its frequency.
    pub fn individuals(&self) -> u64 {
        self.iter().map(|(k, f)| k as u64 * f).sum()
    }

    /// Returns the frequencies.
    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }

    /// Returns an iterator over pairs of abundance and frequency, starting from abundance one.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.0.iter().enumerate().map(|(i, &f)| (i + 1, f))
    }

    /// Returns the largest possible abundance, which equals the number of individuals.
    pub fn max_abundance(&self) -> usize {
        self.0.len()
    }

    /// Returns the number of observations with a non-zero count.
    pub fn observations(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Returns the number of singletons, the observations counted exactly once.
    pub fn singletons(&self) -> u64 {
        self.frequency(1).unwrap_or(0)
    }

    /// Returns the number of doubletons, the observations counted exactly twice.
    pub fn doubletons(&self) -> u64 {
        self.frequency(2).unwrap_or(0)
    }
}

impl AsRef<[u64]> for AbundanceFrequencyCount {
    fn as_ref(&self) -> &[u64] {
        self
    }
}

impl Deref for AbundanceFrequencyCount {
    type Target = [u64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<AbundanceFrequencyCount> for Vec<u64> {
    fn from(frequencies: AbundanceFrequencyCount) -> Self {
        frequencies.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_counts() {
        let frequencies = AbundanceFrequencyCount::from_counts([2, 1, 1]);

        assert_eq!(frequencies.as_slice(), &[2, 1, 0, 0]);
        assert_eq!(frequencies.max_abundance(), 4);
    }

    #[test]
    fn test_from_counts_skips_zeros() {
        let frequencies = AbundanceFrequencyCount::from_counts([0, 3, 0, 1, 1, 0]);

        assert_eq!(frequencies.as_slice(), &[2, 0, 1, 0, 0]);
    }

    #[test]
    fn test_from_counts_single_observation() {
        let frequencies = AbundanceFrequencyCount::from_counts([5]);

        assert_eq!(frequencies.as_slice(), &[0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_from_counts_all_zeros() {
        let frequencies = AbundanceFrequencyCount::from_counts([0, 0]);

        assert!(frequencies.is_empty());
        assert_eq!(frequencies.individuals(), 0);
    }

    #[test]
    fn test_from_counts_allocates_exact_length() {
        let frequencies = AbundanceFrequencyCount::from_counts([1000, 1]).into_inner();

        assert_eq!(frequencies.len(), 1001);
        assert_eq!(frequencies.capacity(), frequencies.len());
        assert_eq!(frequencies[0], 1);
        assert_eq!(frequencies[999], 1);
    }

    #[test]
    #[should_panic]
    fn test_from_counts_overflow() {
        AbundanceFrequencyCount::from_counts([u64::MAX, 1]);
    }

    #[test]
    fn test_frequency() {
        let frequencies = AbundanceFrequencyCount::from_counts([2, 1, 1]);

        assert_eq!(frequencies.frequency(0), None);
        assert_eq!(frequencies.frequency(1), Some(2));
        assert_eq!(frequencies.frequency(2), Some(1));
        assert_eq!(frequencies.frequency(4), Some(0));
        assert_eq!(frequencies.frequency(5), None);
    }

    #[test]
    fn test_summaries() {
        let frequencies = AbundanceFrequencyCount::from_counts([4, 1, 2, 1, 1, 2, 7]);

        assert_eq!(frequencies.observations(), 7);
        assert_eq!(frequencies.individuals(), 18);
        assert_eq!(frequencies.singletons(), 3);
        assert_eq!(frequencies.doubletons(), 2);
        assert_eq!(
            frequencies.iter().filter(|&(_, f)| f > 0).collect::<Vec<_>>(),
            vec![(1, 3), (2, 2), (4, 1), (7, 1)]
        );
    }
}
