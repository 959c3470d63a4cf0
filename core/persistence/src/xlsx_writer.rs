//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::columns::{COLUMN_WIDTHS, HEADERS};
use crate::export::export_table;
use crate::{PersistenceError, TableValue};
use budget_engine::{Budget, ExportContext};
use log::debug;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use std::path::Path;

/// Name of the single sheet an export produces.
pub const SHEET_NAME: &str = "Budget Plan";

pub fn save_xlsx(
    budget: &Budget,
    context: &ExportContext,
    path: &Path,
) -> Result<(), PersistenceError> {
    let mut xlsx = build_workbook(budget, context)?;
    xlsx.save(path)?;
    Ok(())
}

/// Same workbook as `save_xlsx`, returned as bytes.
pub fn write_xlsx_buffer(
    budget: &Budget,
    context: &ExportContext,
) -> Result<Vec<u8>, PersistenceError> {
    let mut xlsx = build_workbook(budget, context)?;
    Ok(xlsx.save_to_buffer()?)
}

fn build_workbook(
    budget: &Budget,
    context: &ExportContext,
) -> Result<XlsxWorkbook, PersistenceError> {
    let table = export_table(budget, context);
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                TableValue::Empty => {}
                // Blank text stays an empty cell so import sees it as missing.
                TableValue::Text(s) if s.is_empty() => {}
                TableValue::Text(s) => {
                    worksheet.write_string(row_num, col as u16, s)?;
                }
                TableValue::Number(n) if !n.is_finite() => {}
                TableValue::Number(n) => {
                    worksheet.write_number(row_num, col as u16, *n)?;
                }
                TableValue::Boolean(b) => {
                    worksheet.write_boolean(row_num, col as u16, *b)?;
                }
            }
        }
    }

    debug!("built '{}' with {} data rows", SHEET_NAME, table.rows.len());
    Ok(xlsx)
}

/// `Budget_Report_{code}_{name}.xlsx`. A blank code becomes `N_A`, a blank
/// name becomes `Budget`, and whitespace runs in the name become `_`.
pub fn default_file_name(context: &ExportContext) -> String {
    let code = if context.school_code.is_empty() {
        "N_A"
    } else {
        context.school_code.as_str()
    };
    let name = if context.school_name.is_empty() {
        "Budget"
    } else {
        context.school_name.as_str()
    };
    format!("Budget_Report_{}_{}.xlsx", code, underscore_whitespace(name))
}

fn underscore_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_engine::{Activity, Goal, LineItem, NodeId, QuarterDetail};
    use std::sync::Arc;

    fn sample() -> Budget {
        let mut item = LineItem::new(NodeId::generate());
        item.name = "Guest lectures".to_string();
        item.q1 = QuarterDetail::new(2500.0, 4.0);
        let mut activity = Activity::new(NodeId::generate(), "Outreach");
        activity.line_items.push(Arc::new(item));
        let mut goal = Goal::new(NodeId::generate(), "Industry links");
        goal.activities.push(Arc::new(activity));
        Budget::from_goals(vec![goal])
    }

    #[test]
    fn test_default_file_name() {
        let context = ExportContext::new("School of  Liberal\tArts", "SLA", "", "");
        assert_eq!(default_file_name(&context), "Budget_Report_SLA_School_of_Liberal_Arts.xlsx");
        assert_eq!(default_file_name(&ExportContext::default()), "Budget_Report_N_A_Budget.xlsx");
    }

    #[test]
    fn test_buffer_is_a_zip_container() {
        let bytes = write_xlsx_buffer(&sample(), &ExportContext::default()).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_save_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.xlsx");
        save_xlsx(&sample(), &ExportContext::default(), &path).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_empty_budget_still_writes_workbook() {
        let bytes = write_xlsx_buffer(&Budget::new(), &ExportContext::default()).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }
}
