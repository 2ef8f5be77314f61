use std::{fmt, io};

use anyhow::{Context, Error};

use richness_core::{
    table::io::read::Builder, AbundanceFrequencyCount, Estimator, Input, RichnessStatistics,
    SparseTable,
};

use super::{Stat, Statistic};

#[derive(Debug)]
pub struct Runner<W> {
    writer: W,
    table: SparseTable,
    statistics: Vec<Statistic>,
    header: bool,
    delimiter: char,
}

impl<W> Runner<W>
where
    W: io::Write,
{
    pub fn new(
        writer: W,
        table: SparseTable,
        statistics: Vec<Statistic>,
        header: bool,
        delimiter: char,
    ) -> Self {
        Self {
            writer,
            table,
            statistics,
            header,
            delimiter,
        }
    }

    pub fn run(&mut self) -> Result<(), Error> {
        let estimator = Estimator::new(&self.table)?;

        log::info!(
            "Calculating statistics for {} samples and {} observations",
            estimator.sample_count(),
            self.table.observations().len(),
        );

        if self.header {
            let header_names = std::iter::once("sample")
                .chain(self.statistics.iter().map(Statistic::header_name))
                .collect::<Vec<_>>();

            write_with_delimiter(&mut self.writer, self.delimiter, header_names)?;
        }

        let wants = |statistic| self.statistics.contains(&statistic);
        let mut iter_totals =
            wants(Statistic::Total).then(|| estimator.iter_total_individual_counts());
        let mut iter_observed =
            wants(Statistic::Observed).then(|| estimator.iter_observation_counts());
        let mut iter_frequencies =
            wants(Statistic::Frequencies).then(|| estimator.abundance_frequency_counts());

        for sample in estimator.samples() {
            let total = iter_totals.as_mut().and_then(Iterator::next);
            let observed = iter_observed.as_mut().and_then(Iterator::next);
            let frequencies = iter_frequencies.as_mut().and_then(Iterator::next);

            if let Some(frequencies) = &frequencies {
                log::debug!(
                    "Sample '{sample}' has {} singletons and {} doubletons",
                    frequencies.singletons(),
                    frequencies.doubletons(),
                );
            }

            let mut fields = vec![sample.to_string()];
            for statistic in self.statistics.iter() {
                let field = match statistic {
                    Statistic::Total => total.map(|x| x.to_string()),
                    Statistic::Observed => observed.map(|x| x.to_string()),
                    Statistic::Frequencies => frequencies.as_ref().map(format_frequencies),
                };
                fields.extend(field);
            }

            write_with_delimiter(&mut self.writer, self.delimiter, fields)?;
        }

        Ok(())
    }
}

fn format_frequencies(frequencies: &AbundanceFrequencyCount) -> String {
    frequencies
        .as_slice()
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn write_with_delimiter<W, I>(writer: &mut W, delimiter: char, items: I) -> io::Result<()>
where
    W: io::Write,
    I: IntoIterator,
    I::Item: fmt::Display,
{
    for (i, x) in items.into_iter().enumerate() {
        if i > 0 {
            write!(writer, "{delimiter}")?;
        }
        write!(writer, "{x}")?;
    }
    writeln!(writer)
}

impl TryFrom<&Stat> for Runner<io::StdoutLock<'static>> {
    type Error = Error;

    fn try_from(args: &Stat) -> Result<Self, Self::Error> {
        let input = Input::new(args.input.clone())?;
        let source = match input.as_path() {
            Some(path) => format!("'{}'", path.display()),
            None => String::from("stdin"),
        };

        let table = Builder::default()
            .set_input(input)
            .read()
            .with_context(|| format!("failed to read table from {source}"))?;

        log::debug!(
            "Read table with {} samples and {} observations",
            table.samples().len(),
            table.observations().len(),
        );

        Ok(Self::new(
            io::stdout().lock(),
            table,
            args.statistics.clone(),
            args.header,
            args.delimiter,
        ))
    }
}
