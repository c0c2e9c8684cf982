//! Loading datasets from delimited text files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;

use crate::dataset::Dataset;
use crate::error::Result;

/// How a delimited file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub has_headers: bool,
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { has_headers: true, delimiter: b',' }
    }
}

impl CsvOptions {
    /// Default options for `path`, switching to tab-separated for `.tsv` files.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        let is_tsv = path.as_ref().extension().map(|e| e == "tsv").unwrap_or(false);
        let delimiter = if is_tsv { b'\t' } else { b',' };
        Self { delimiter, ..Self::default() }
    }
}

/// Reads the file at `path` into a dataset whose targets come from `target_column`.
pub fn dataset_from_path<P: AsRef<Path>>(path: P, target_column: usize, options: CsvOptions) -> Result<Dataset> {
    log::debug!("loading dataset from {:?}", path.as_ref());
    let file = File::open(path.as_ref())?;
    dataset_from_reader(BufReader::new(file), target_column, options)
}

/// Reads delimited records from `reader` into a dataset.
///
/// Rows with a different column count than the first are passed through to
/// dataset validation and rejected there as a schema error.
pub fn dataset_from_reader<R: Read>(reader: R, target_column: usize, options: CsvOptions) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(reader);

    let records = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;
    Dataset::from_records(records.iter(), target_column)
}
