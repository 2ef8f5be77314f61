//! Utilities for reading tables.

use std::io;

use flate2::bufread::MultiGzDecoder;

use crate::{input, table::SparseTable, Input};

use super::text;

/// A builder to read a table.
#[derive(Debug, Default)]
pub struct Builder {
    input: Option<Input>,
    compression_method: Option<Option<CompressionMethod>>,
}

impl Builder {
    /// Read table from the configured input.
    ///
    /// If no input has been set, stdin will be used.
    pub fn read(self) -> io::Result<SparseTable> {
        let reader = self.input.as_ref().unwrap_or(&Input::Stdin).open()?;

        match reader {
            input::Reader::File(reader) => self.read_from_reader(reader),
            input::Reader::Stdin(reader) => self.read_from_reader(reader),
        }
    }

    /// Read table from reader.
    ///
    /// Compression will be detected unless set explicitly.
    pub fn read_from_reader<R>(self, mut reader: R) -> io::Result<SparseTable>
    where
        R: io::BufRead,
    {
        let compression_method = match self.compression_method {
            Some(compression_method) => compression_method,
            None => CompressionMethod::detect(&mut reader)?,
        };

        match compression_method {
            Some(CompressionMethod::Gzip) => {
                text::read_table(&mut io::BufReader::new(MultiGzDecoder::new(reader)))
            }
            None => text::read_table(&mut reader),
        }
    }

    /// Set compression method.
    ///
    /// If unset, the compression method will automatically be detected when reading.
    pub fn set_compression_method(mut self, compression_method: Option<CompressionMethod>) -> Self {
        self.compression_method = Some(compression_method);
        self
    }

    /// Set input.
    pub fn set_input(mut self, input: Input) -> Self {
        self.input = Some(input);
        self
    }
}

/// Supported compression methods.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMethod {
    /// Gzip, including multi-member and BGZF files.
    Gzip,
}

impl CompressionMethod {
    fn detect<R>(reader: &mut R) -> io::Result<Option<Self>>
    where
        R: io::BufRead,
    {
        const GZIP_MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

        let src = reader.fill_buf()?;

        if let Some(buf) = src.get(..GZIP_MAGIC_NUMBER.len()) {
            if buf == GZIP_MAGIC_NUMBER {
                return Ok(Some(CompressionMethod::Gzip));
            }
        }

        Ok(None)
    }
}
