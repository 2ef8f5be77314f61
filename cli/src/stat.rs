use std::{fmt, path::PathBuf};

use anyhow::Error;

use clap::{Parser, ValueEnum};

mod runner;
use runner::Runner;

/// Calculate per-sample richness statistics from a table.
#[derive(Debug, Parser)]
pub struct Stat {
    /// Input table.
    ///
    /// The table can be provided here or read from stdin. The table should be in the classic
    /// tab-separated format, with one row per observation and one column per sample, and may be
    /// gzip-compressed.
    #[clap(value_parser, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Delimiter between statistics.
    #[clap(short = 'd', long, default_value_t = '\t', value_name = "CHAR")]
    pub delimiter: char,

    /// Include a header with the names of statistics.
    #[clap(short = 'H', long)]
    pub header: bool,

    /// Statistics to calculate.
    ///
    /// More than one statistic can be output. Use comma to separate statistics. Each line of
    /// output gives a sample identifier followed by its statistics in the order provided.
    #[clap(
        short = 's',
        long,
        value_enum,
        use_value_delimiter = true,
        default_values = ["total", "observed", "frequencies"],
        value_name = "STAT,..."
    )]
    pub statistics: Vec<Statistic>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Statistic {
    /// Total number of individuals.
    Total,
    /// Number of observations with a non-zero count.
    Observed,
    /// Abundance frequency counts: the number of observations counted exactly k times, for k
    /// from one to the total number of individuals. Values are separated by commas.
    Frequencies,
}

impl Statistic {
    pub fn header_name(&self) -> &'static str {
        match self {
            Statistic::Total => "total_individuals",
            Statistic::Observed => "observations",
            Statistic::Frequencies => "abundance_frequencies",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_name())
    }
}

impl Stat {
    pub fn run(self) -> Result<(), Error> {
        let mut runner = Runner::try_from(&self)?;
        runner.run()
    }
}
