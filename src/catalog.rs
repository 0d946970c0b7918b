//! Item catalog: the fixed, ordered inventory every candidate selects from.
//!
//! The catalog is loaded once before a run and never mutated afterwards.
//! An item's position in the catalog is its index into every selection
//! vector; the `id` column of the source is carried but not authoritative.
//!
//! # Source format
//!
//! Headerless CSV, one record per item, three integer columns:
//!
//! ```text
//! 0,10,60
//! 1,20,100
//! 2,30,120
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument};

/// Failure to load a catalog.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    /// The source file could not be opened.
    #[error("cannot open catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader itself failed.
    #[error("failed to read catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A record does not have exactly three columns.
    #[error("row {row}: expected 3 columns (index, weight, value), found {found}")]
    ColumnCount { row: usize, found: usize },

    /// A column could not be parsed as an integer.
    #[error("row {row}: column '{column}' is not a valid integer: '{value}'")]
    NotAnInteger {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The source contained no records.
    #[error("catalog contains no items")]
    Empty,

    /// Summed over every item, weight or value does not fit in a `u64`.
    #[error("total {column} of all items exceeds {max}", max = u64::MAX)]
    TotalOverflow { column: &'static str },
}

/// A single item that may be packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Identifier from the source. Informational only.
    pub id: i64,
    /// Weight counted against the knapsack capacity.
    pub weight: u64,
    /// Value contributed to fitness when selected.
    pub value: u64,
}

impl Item {
    pub fn new(id: i64, weight: u64, value: u64) -> Self {
        Self { id, weight, value }
    }
}

/// Immutable ordered list of items, indexed `0..len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog from already-parsed items.
    ///
    /// Fails with [`DataSourceError::Empty`] if `items` is empty, and with
    /// [`DataSourceError::TotalOverflow`] if the weights or values of all
    /// items together overflow a `u64`. Any selection's totals therefore fit.
    pub fn from_items(items: Vec<Item>) -> Result<Self, DataSourceError> {
        if items.is_empty() {
            return Err(DataSourceError::Empty);
        }
        checked_total(&items, "weight", |item| item.weight)?;
        checked_total(&items, "value", |item| item.value)?;
        Ok(Self { items })
    }

    /// Builds a catalog from `(weight, value)` pairs, numbering ids by position.
    pub fn from_pairs(pairs: &[(u64, u64)]) -> Result<Self, DataSourceError> {
        let items = pairs
            .iter()
            .enumerate()
            .map(|(i, &(weight, value))| Item::new(i as i64, weight, value))
            .collect();
        Self::from_items(items)
    }

    /// Loads a catalog from a CSV file on disk.
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataSourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Loads a catalog from any CSV byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataSourceError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut items = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row = i + 1;
            if record.len() != 3 {
                return Err(DataSourceError::ColumnCount {
                    row,
                    found: record.len(),
                });
            }
            let id = parse_field::<i64>(&record[0], row, "index")?;
            let weight = parse_field::<u64>(&record[1], row, "weight")?;
            let value = parse_field::<u64>(&record[2], row, "value")?;
            items.push(Item::new(id, weight, value));
        }

        debug!(items = items.len(), "catalog loaded");
        Self::from_items(items)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false` for a successfully built catalog.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at position `index`.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Total weight of the items flagged in `selection`.
    pub fn weight_of(&self, selection: &[bool]) -> u64 {
        debug_assert_eq!(selection.len(), self.items.len());
        self.selected(selection).map(|item| item.weight).sum()
    }

    /// Total value of the items flagged in `selection`.
    pub fn value_of(&self, selection: &[bool]) -> u64 {
        debug_assert_eq!(selection.len(), self.items.len());
        self.selected(selection).map(|item| item.value).sum()
    }

    fn selected<'a>(&'a self, selection: &'a [bool]) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .zip(selection)
            .filter(|(_, included)| **included)
            .map(|(item, _)| item)
    }
}

impl std::ops::Index<usize> for Catalog {
    type Output = Item;

    fn index(&self, index: usize) -> &Item {
        &self.items[index]
    }
}

fn checked_total(
    items: &[Item],
    column: &'static str,
    field: impl Fn(&Item) -> u64,
) -> Result<u64, DataSourceError> {
    items
        .iter()
        .try_fold(0u64, |acc, item| acc.checked_add(field(item)))
        .ok_or(DataSourceError::TotalOverflow { column })
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    row: usize,
    column: &'static str,
) -> Result<T, DataSourceError> {
    raw.parse().map_err(|_| DataSourceError::NotAnInteger {
        row,
        column,
        value: raw.to_string(),
    })
}
