//! JSON-file workbook
//!
//! An in-memory workbook of named tables and named ranges, loaded from and
//! saved to a single JSON file. Each table is an ordered list of rows; rows
//! are only ever appended or updated in place, so a row index stays valid for
//! the lifetime of the workbook.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::file_io::{read_json_required, write_json_atomic};
use super::row::{cell_to_string, is_blank, Row};
use super::tables::{
    EXPENSES_RANGE, EXPENSE_DATA, STANDARD_TABLES, TRANSACTIONS, TRANSACTION_IDS_RANGE,
};
use super::TabularStore;
use crate::error::{RolloverError, RolloverResult};

/// A named single-column range
///
/// Either literal values, or a reference to one column of a table (the way a
/// spreadsheet name such as `=ExpenseData[Expense Type]` works).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamedRange {
    Column { table: String, column: String },
    Values(Vec<Value>),
}

/// On-disk layout of a workbook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WorkbookData {
    #[serde(default)]
    tables: BTreeMap<String, Vec<Row>>,
    #[serde(default)]
    names: BTreeMap<String, NamedRange>,
}

/// A workbook held in memory and optionally backed by a JSON file
pub struct Workbook {
    path: Option<PathBuf>,
    tables: RwLock<HashMap<String, Vec<Row>>>,
    names: RwLock<HashMap<String, NamedRange>>,
    /// Bumped on every append or update
    revision: AtomicU64,
}

impl Workbook {
    /// Create an empty in-memory workbook with no tables
    pub fn new() -> Self {
        Self {
            path: None,
            tables: RwLock::new(HashMap::new()),
            names: RwLock::new(HashMap::new()),
            revision: AtomicU64::new(0),
        }
    }

    /// Create an in-memory workbook containing every standard table (empty)
    /// and the standard named ranges
    pub fn with_standard_layout() -> Self {
        let workbook = Self::new();
        {
            let mut tables = workbook.tables.write().unwrap_or_else(|e| e.into_inner());
            for (name, _) in STANDARD_TABLES {
                tables.insert((*name).to_string(), Vec::new());
            }

            let mut names = workbook.names.write().unwrap_or_else(|e| e.into_inner());
            names.insert(
                EXPENSES_RANGE.to_string(),
                NamedRange::Column {
                    table: EXPENSE_DATA.to_string(),
                    column: "Expense Type".to_string(),
                },
            );
            names.insert(
                TRANSACTION_IDS_RANGE.to_string(),
                NamedRange::Column {
                    table: TRANSACTIONS.to_string(),
                    column: "Id".to_string(),
                },
            );
        }
        workbook
    }

    /// Open a workbook file
    pub fn open(path: impl Into<PathBuf>) -> RolloverResult<Self> {
        let path = path.into();
        let data: WorkbookData = read_json_required(&path)?;

        debug!(
            path = %path.display(),
            tables = data.tables.len(),
            names = data.names.len(),
            "Loaded workbook"
        );

        Ok(Self {
            path: Some(path),
            tables: RwLock::new(data.tables.into_iter().collect()),
            names: RwLock::new(data.names.into_iter().collect()),
            revision: AtomicU64::new(0),
        })
    }

    /// Attach (or replace) the file this workbook saves to
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of writes since the workbook was created or opened
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Save the workbook to its file
    pub fn save(&self) -> RolloverResult<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| RolloverError::Storage("Workbook has no file to save to".into()))?;

        let tables = self
            .tables
            .read()
            .map_err(|e| RolloverError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let names = self
            .names
            .read()
            .map_err(|e| RolloverError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let data = WorkbookData {
            tables: tables.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            names: names.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        };

        write_json_atomic(path, &data)
    }

    /// Create an empty table, leaving an existing table untouched
    pub fn create_table(&self, name: &str) -> RolloverResult<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| RolloverError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        tables.entry(name.to_string()).or_default();
        Ok(())
    }

    /// Define or replace a named range
    pub fn set_named_range(&self, name: &str, range: NamedRange) -> RolloverResult<()> {
        let mut names = self
            .names
            .write()
            .map_err(|e| RolloverError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        names.insert(name.to_string(), range);
        Ok(())
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> RolloverResult<Vec<String>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| RolloverError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let mut list: Vec<_> = tables.keys().cloned().collect();
        list.sort();
        Ok(list)
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularStore for Workbook {
    fn read_table(&self, table: &str) -> RolloverResult<Vec<Row>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| RolloverError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        tables
            .get(table)
            .cloned()
            .ok_or_else(|| RolloverError::table_not_found(table))
    }

    fn read_named_values(&self, name: &str) -> RolloverResult<Vec<String>> {
        let range = {
            let names = self.names.read().map_err(|e| {
                RolloverError::Storage(format!("Failed to acquire read lock: {}", e))
            })?;
            names
                .get(name)
                .cloned()
                .ok_or_else(|| RolloverError::range_not_found(name))?
        };

        let cells: Vec<Value> = match range {
            NamedRange::Values(values) => values,
            NamedRange::Column { table, column } => self
                .read_table(&table)?
                .into_iter()
                .map(|mut row| row.remove(&column).unwrap_or(Value::Null))
                .collect(),
        };

        let mut values: Vec<String> = Vec::new();
        for cell in cells.iter().filter(|cell| !is_blank(cell)) {
            let text = cell_to_string(cell);
            if !values.contains(&text) {
                values.push(text);
            }
        }
        Ok(values)
    }

    fn append_row(&self, table: &str, row: Row) -> RolloverResult<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| RolloverError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let rows = tables
            .get_mut(table)
            .ok_or_else(|| RolloverError::table_not_found(table))?;
        rows.push(row);
        self.bump();
        Ok(())
    }

    fn update_row(&self, table: &str, index: usize, row: Row) -> RolloverResult<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| RolloverError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let rows = tables
            .get_mut(table)
            .ok_or_else(|| RolloverError::table_not_found(table))?;
        let len = rows.len();
        let target = rows.get_mut(index).ok_or_else(|| {
            RolloverError::Storage(format!(
                "Row {} is out of range for table '{}' ({} rows)",
                index, table, len
            ))
        })?;

        // Columns not named in the update keep their values
        for (column, value) in row {
            target.insert(column, value);
        }
        self.bump();
        Ok(())
    }
}
