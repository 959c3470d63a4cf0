//! FILENAME: core/persistence/src/lib.rs
//! Budget Persistence Module
//!
//! Converts budget trees to and from a flat, one-row-per-line-item table and
//! reads/writes that table as an XLSX spreadsheet.

pub mod columns;
mod error;
pub mod export;
pub mod import;
mod xlsx_reader;
mod xlsx_writer;

pub use error::PersistenceError;
pub use export::{export_table, flatten, serial_label, BudgetRecord, QuarterCells};
pub use import::{import_table, parse_number, rebuild, DEFAULT_GOAL, DEFAULT_LINE_ITEM, DEFAULT_STRATEGY};
pub use xlsx_reader::{load_xlsx, read_first_sheet, read_xlsx_bytes};
pub use xlsx_writer::{default_file_name, save_xlsx, write_xlsx_buffer, SHEET_NAME};

use budget_engine::{BudgetDocument, ExportContext};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

// ============================================================================
// TABLE
// ============================================================================

/// A cell of the flat table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl TableValue {
    pub fn is_empty(&self) -> bool {
        match self {
            TableValue::Empty => true,
            TableValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Text form of the value. Whole numbers print without a decimal point.
    pub fn display_value(&self) -> String {
        match self {
            TableValue::Empty => String::new(),
            TableValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            TableValue::Text(s) => s.clone(),
            TableValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
        }
    }
}

/// One data row keyed by header text. Empty cells are not stored.
pub type Record = HashMap<String, TableValue>;

/// Header row plus data rows, as read from or written to a sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<TableValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
        }
    }

    /// Rows as header-keyed records. Blank rows are skipped, as are cells
    /// under an empty header. When a header repeats, only its first column
    /// is read, even where that cell is blank.
    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .map(|row| {
                let mut record = Record::new();
                let mut seen: HashSet<&str> = HashSet::new();
                for (header, cell) in self.headers.iter().zip(row.iter()) {
                    if header.is_empty() || !seen.insert(header.as_str()) {
                        continue;
                    }
                    if !matches!(cell, TableValue::Empty) {
                        record.insert(header.clone(), cell.clone());
                    }
                }
                record
            })
            .collect()
    }
}

// ============================================================================
// DOCUMENT HELPERS
// ============================================================================

/// Reads a spreadsheet and applies it to the document. On failure the
/// document is left exactly as it was.
pub fn import_into_document(doc: &mut BudgetDocument, path: &Path) -> Result<(), PersistenceError> {
    let imported = load_xlsx(path)?;
    doc.apply_import(imported);
    Ok(())
}

/// Writes the document into `dir` under its default file name, stamped with
/// `timestamp`. Returns the written path.
pub fn export_document(
    doc: &BudgetDocument,
    dir: &Path,
    timestamp: &str,
) -> Result<PathBuf, PersistenceError> {
    let context: ExportContext = doc.export_context(timestamp);
    let path = dir.join(default_file_name(&context));
    save_xlsx(&doc.budget, &context, &path)?;
    info!("exported budget to {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value() {
        assert_eq!(TableValue::Number(42.0).display_value(), "42");
        assert_eq!(TableValue::Number(2.5).display_value(), "2.5");
        assert_eq!(TableValue::Boolean(true).display_value(), "TRUE");
        assert_eq!(TableValue::Empty.display_value(), "");
    }

    #[test]
    fn test_records_skip_blank_rows_and_cells() {
        let mut table = Table::new(vec!["Goal".to_string(), "".to_string(), "Unit".to_string()]);
        table.rows.push(vec![
            TableValue::Text("G".to_string()),
            TableValue::Text("ignored".to_string()),
            TableValue::Empty,
        ]);
        table.rows.push(vec![TableValue::Empty, TableValue::Text(String::new()), TableValue::Empty]);
        table.rows.push(vec![TableValue::Empty, TableValue::Empty, TableValue::Number(3.0)]);

        let records = table.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Goal"), Some(&TableValue::Text("G".to_string())));
        assert!(!records[0].contains_key("Unit"));
        assert!(!records[0].contains_key(""));
        assert_eq!(records[1].get("Unit"), Some(&TableValue::Number(3.0)));
    }

    #[test]
    fn test_records_first_duplicate_header_wins() {
        let mut table = Table::new(vec!["Goal".to_string(), "Goal".to_string()]);
        table.rows.push(vec![
            TableValue::Text("First".to_string()),
            TableValue::Text("Second".to_string()),
        ]);
        table.rows.push(vec![TableValue::Empty, TableValue::Text("Only".to_string())]);

        let records = table.records();
        assert_eq!(records[0].get("Goal"), Some(&TableValue::Text("First".to_string())));
        assert!(!records[1].contains_key("Goal"));

        let budget = import_table(&table).budget;
        assert_eq!(budget.goals[0].name, "First");
        assert_eq!(budget.goals[1].name, DEFAULT_GOAL);
    }

    #[test]
    fn test_records_tolerate_short_rows() {
        let mut table = Table::new(vec!["Goal".to_string(), "Strategy".to_string()]);
        table.rows.push(vec![TableValue::Text("G".to_string())]);
        let records = table.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
    }
}
