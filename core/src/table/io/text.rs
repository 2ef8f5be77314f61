//! Reading for the classic text table format.
//!
//! The classic format is a tab-separated table with one row per observation and one column per
//! sample. Lines starting with `#` are comments, except for the header line, which starts with
//! `#OTU ID` (or `#Observation ID`) and is followed by the sample identifiers. The header may end
//! in a metadata column (`taxonomy` or `Consensus Lineage`), which is ignored. Each following
//! line gives an observation identifier and its count in each sample.
//!
//! ```text
//! # Constructed from biom file
//! #OTU ID	S1	S2	taxonomy
//! A	2	0	k__Bacteria
//! B	1	5	k__Archaea
//! ```

use std::{fmt, io, str::FromStr};

use crate::table::{Observation, Sample, SparseTable};

const HEADER_STARTS: [&str; 2] = ["#OTU ID", "#Observation ID"];

const METADATA_COLUMNS: [&str; 2] = ["taxonomy", "Consensus Lineage"];

/// Reads a table in text format from a reader.
///
/// The stream is assumed to be positioned at the start.
pub fn read_table<R>(reader: &mut R) -> io::Result<SparseTable>
where
    R: io::BufRead,
{
    let mut header: Option<Header> = None;
    let mut rows = Vec::new();

    let mut buf = String::new();
    let mut line = 0;
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line += 1;

        let s = buf.trim_end_matches(['\n', '\r']);
        if s.trim().is_empty() {
            continue;
        }

        match &header {
            None => {
                if let Some(parsed) = Header::parse(s, line)? {
                    header = Some(parsed);
                } else if !s.starts_with('#') {
                    return Err(ParseError::MissingHeader { line }.into());
                }
            }
            Some(header) if !s.starts_with('#') => rows.push(header.parse_row(s, line)?),
            Some(_) => (),
        }
    }

    let header = header.ok_or(ParseError::MissingHeader { line })?;

    SparseTable::from_observation_rows(header.samples, rows)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Header {
    samples: Vec<Sample>,
    metadata: bool,
}

impl Header {
    fn parse(s: &str, line: usize) -> Result<Option<Self>, ParseError> {
        let mut fields = s.split('\t');
        let first = fields.next().unwrap_or_default();

        if !HEADER_STARTS.iter().any(|start| first.trim() == *start) {
            return Ok(None);
        }

        let mut samples = fields.map(|field| field.trim()).collect::<Vec<_>>();
        let metadata = samples
            .last()
            .is_some_and(|last| METADATA_COLUMNS.contains(last));
        if metadata {
            samples.pop();
        }

        if samples.iter().any(|sample| sample.is_empty()) {
            return Err(ParseError::EmptyIdentifier { line });
        }

        Ok(Some(Self {
            samples: samples.into_iter().map(Sample::from).collect(),
            metadata,
        }))
    }

    fn parse_row(&self, s: &str, line: usize) -> Result<(Observation, Vec<u64>), ParseError> {
        let fields = s.split('\t').collect::<Vec<_>>();

        let expected = 1 + self.samples.len();
        let valid = fields.len() == expected || (self.metadata && fields.len() == expected + 1);
        if !valid {
            return Err(ParseError::FieldCount {
                line,
                expected: expected + usize::from(self.metadata),
                found: fields.len(),
            });
        }

        let observation = match fields[0].trim() {
            "" => return Err(ParseError::EmptyIdentifier { line }),
            id => Observation::from(id),
        };
        let counts = fields[1..expected]
            .iter()
            .map(|field| {
                parse_count(field).ok_or_else(|| ParseError::InvalidCount {
                    line,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((observation, counts))
    }
}

/// Parses a non-negative integer count, allowing integral floats such as `2.0`.
fn parse_count(s: &str) -> Option<u64> {
    let s = s.trim();

    u64::from_str(s).ok().or_else(|| {
        let x = f64::from_str(s).ok()?;
        (x.is_finite() && x >= 0. && x.fract() == 0. && x < u64::MAX as f64).then_some(x as u64)
    })
}

/// An error associated with parsing a table in text format.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// A sample or observation identifier was empty.
    EmptyIdentifier {
        /// The line number.
        line: usize,
    },
    /// A row did not have one field per sample after the observation identifier.
    FieldCount {
        /// The line number.
        line: usize,
        /// The expected number of fields.
        expected: usize,
        /// The found number of fields.
        found: usize,
    },
    /// A count was not a non-negative integer.
    InvalidCount {
        /// The line number.
        line: usize,
        /// The invalid value.
        value: String,
    },
    /// No header line preceded the data.
    MissingHeader {
        /// The line number at which the header was missing.
        line: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyIdentifier { line } => write!(f, "line {line}: empty identifier"),
            ParseError::FieldCount {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected} fields, found {found}"),
            ParseError::InvalidCount { line, value } => {
                write!(f, "line {line}: invalid count '{value}'")
            }
            ParseError::MissingHeader { line } => write!(
                f,
                "line {line}: expected header line starting with '{}'",
                HEADER_STARTS[0]
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for io::Error {
    fn from(e: ParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}
