#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Per-sample abundance statistics for observation richness estimation.
//!
//! This serves as the core library implementation for the `richness` CLI, but can also be used
//! as a free-standing library by implementations of nonparametric richness estimators such as
//! Chao1 or ACE.
//!
//! # Overview
//!
//! The core struct is an [`Estimator`], which wraps a sample-by-observation count [`Table`].
//! Constructing an estimator validates the table, after which it provides per-sample totals,
//! observed observation counts, and [`AbundanceFrequencyCount`]s through the
//! [`RichnessStatistics`] trait.
//!
//! # Example
//!
//! Let's read a small table in the classic text format, and calculate the number of singletons
//! and doubletons in each sample.
//!
//! ```
//! use richness_core::{table, Estimator, RichnessStatistics};
//!
//! let src = b"#OTU ID\tS1\tS2\nA\t2\t1\nB\t1\t1\nC\t1\t0\n";
//! let table = table::io::read::Builder::default().read_from_reader(&src[..])?;
//!
//! let estimator = Estimator::new(&table)?;
//!
//! let singletons_and_doubletons = estimator
//!     .abundance_frequency_counts()
//!     .map(|frequencies| (frequencies.singletons(), frequencies.doubletons()))
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(singletons_and_doubletons, vec![(2, 1), (2, 0)]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod estimator;
pub use estimator::{AbundanceFrequencyCount, Estimator, RichnessStatistics};

pub mod input;
pub use input::Input;

pub mod table;
pub use table::{Observation, Sample, SparseTable, Table};
