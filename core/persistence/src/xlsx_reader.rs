//! FILENAME: core/persistence/src/xlsx_reader.rs

use crate::import::import_table;
use crate::{PersistenceError, Table, TableValue};
use budget_engine::ImportedBudget;
use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use log::info;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

pub fn load_xlsx(path: &Path) -> Result<ImportedBudget, PersistenceError> {
    let bytes = std::fs::read(path)?;
    read_xlsx_bytes(&bytes)
}

/// Parses a workbook held in memory (xlsx, xls, xlsb or ods).
pub fn read_xlsx_bytes(bytes: &[u8]) -> Result<ImportedBudget, PersistenceError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let table = read_first_sheet(&mut workbook)?;
    let imported = import_table(&table);
    info!(
        "imported {} line items from {} rows",
        imported.budget.line_item_count(),
        table.rows.len()
    );
    Ok(imported)
}

/// The first sheet as a table. Its first row is the header row; every other
/// sheet is ignored.
pub fn read_first_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
) -> Result<Table, PersistenceError> {
    let sheet_names = workbook.sheet_names();
    let Some(sheet_name) = sheet_names.first() else {
        return Err(PersistenceError::InvalidFormat(
            "Workbook contains no sheets".to_string(),
        ));
    };

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| PersistenceError::SheetNotFound(format!("{}: {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(row) => row
            .iter()
            .map(|cell| convert_cell(cell).display_value().trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let mut table = Table::new(headers);
    table.rows = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    Ok(table)
}

fn convert_cell(cell: &Data) -> TableValue {
    match cell {
        Data::Empty => TableValue::Empty,
        Data::String(s) => TableValue::Text(s.clone()),
        Data::Float(f) => TableValue::Number(*f),
        Data::Int(i) => TableValue::Number(*i as f64),
        Data::Bool(b) => TableValue::Boolean(*b),
        Data::Error(_) => TableValue::Empty,
        Data::DateTime(dt) => TableValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => TableValue::Text(s.clone()),
        Data::DurationIso(s) => TableValue::Text(s.clone()),
    }
}
