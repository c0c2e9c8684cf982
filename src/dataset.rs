//! Immutable, random-access tables of feature rows with a target column.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::common_types::{Class, Row};
use crate::error::{KnnError, Result};

/// An ordered, fixed-length sequence of rows sharing one feature width.
///
/// A `Dataset` is never mutated after construction, so it can be read from any
/// number of threads at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
    num_features: usize,
    target_column: Option<usize>,
}

impl Dataset {
    /// Builds a dataset from raw string records, splitting each record into its
    /// feature fields and the field at `target_column`.
    ///
    /// Every record must have the same number of columns as the first one, the
    /// target column must exist, and every other field must parse as `f64`.
    pub fn from_records<R, S>(records: R, target_column: usize) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows = Vec::new();
        let mut num_columns = None;

        for (line, record) in records.into_iter().enumerate() {
            let fields: Vec<S> = record.into_iter().collect();
            let expected = *num_columns.get_or_insert(fields.len());

            if fields.len() != expected {
                return Err(KnnError::Schema(format!(
                    "record {} has {} columns, expected {}",
                    line,
                    fields.len(),
                    expected
                )));
            }
            if target_column >= expected {
                return Err(KnnError::Schema(format!(
                    "target column {} out of range for {} columns",
                    target_column, expected
                )));
            }

            let mut features = Vec::with_capacity(expected - 1);
            for (column, field) in fields.iter().enumerate() {
                if column == target_column {
                    continue;
                }
                let field = field.as_ref().trim();
                let value = field.parse::<f64>().map_err(|_| {
                    KnnError::Schema(format!(
                        "record {} column {}: '{}' is not numeric",
                        line, column, field
                    ))
                })?;
                features.push(value);
            }

            let target = Class::from_field(fields[target_column].as_ref());
            rows.push(Row::new(features, target));
        }

        let num_features = num_columns.map_or(0, |columns| columns - 1);
        log::debug!(
            "parsed dataset with {} rows, {} features, target column {}",
            rows.len(),
            num_features,
            target_column
        );
        Ok(Dataset { rows, num_features, target_column: Some(target_column) })
    }

    /// Builds a dataset from already-typed rows. All rows must share one feature width.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self> {
        let num_features = rows.first().map_or(0, Row::num_features);
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.num_features() != num_features)
        {
            return Err(KnnError::Schema(format!(
                "row {} has {} features, expected {}",
                i,
                row.num_features(),
                num_features
            )));
        }
        Ok(Dataset { rows, num_features, target_column: None })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Feature width shared by every row; zero for an empty dataset.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Column the targets were read from, when built from tabular records.
    pub fn target_column(&self) -> Option<usize> {
        self.target_column
    }

    pub fn row(&self, index: usize) -> Result<&Row> {
        self.rows.get(index).ok_or(KnnError::Index { index, len: self.rows.len() })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Shuffles row indices with a seeded RNG and splits off `test_fraction` of
    /// the rows (rounded down) as a test set. The same seed always yields the
    /// same split.
    pub fn train_test_split(&self, test_fraction: f64, seed: u64) -> Result<(Dataset, Dataset)> {
        if !(0.0..=1.0).contains(&test_fraction) {
            return Err(KnnError::InvalidParameter(format!(
                "test fraction must be within [0, 1], got {}",
                test_fraction
            )));
        }

        let mut indices: Vec<usize> = (0..self.rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let num_test = (self.rows.len() as f64 * test_fraction).floor() as usize;
        let (test_indices, train_indices) = indices.split_at(num_test);

        Ok((self.subset(train_indices), self.subset(test_indices)))
    }

    fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            num_features: self.num_features,
            target_column: self.target_column,
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
