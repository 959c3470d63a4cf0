//! FILENAME: core/persistence/src/columns.rs
//! PURPOSE: Column layout of the budget spreadsheet and the header aliases
//! accepted on import.
//! CONTEXT: Export always writes `HEADERS` in this exact order. Import looks
//! fields up by header text, trying the primary header first and then the
//! aliases older exports used.

use budget_engine::Quarter;

pub const SCHOOL_CODE: &str = "School Code";
pub const SCHOOL_NAME: &str = "School / Activity / Function";
pub const SERIAL_NO: &str = "Serial No";
pub const GOAL: &str = "Goal";
pub const STRATEGY: &str = "Strategy";
pub const LINE_ITEM: &str = "Activity / Cost Head";
pub const DESCRIPTION: &str = "Details / Description";
pub const REMARKS: &str = "Remarks";
pub const REVIEW_COMMENTS: &str = "VC Review Remarks";
pub const LEDGER_NAME: &str = "Ledger Name";
pub const LEDGER_CODE: &str = "Ledger Code";
pub const UNIT: &str = "Unit";
pub const ANNUAL_TOTAL: &str = "Annual Total (INR)";
pub const SUBMITTED_BY: &str = "Submitted By";
pub const TIMESTAMP: &str = "Submission Timestamp";

/// Every exported column, in order.
pub const HEADERS: [&str; 27] = [
    SCHOOL_CODE,
    SCHOOL_NAME,
    SERIAL_NO,
    GOAL,
    STRATEGY,
    LINE_ITEM,
    DESCRIPTION,
    REMARKS,
    REVIEW_COMMENTS,
    LEDGER_NAME,
    LEDGER_CODE,
    UNIT,
    "Q1 Quantity",
    "Q1 Rate",
    "Q1 Total (INR)",
    "Q2 Quantity",
    "Q2 Rate",
    "Q2 Total (INR)",
    "Q3 Quantity",
    "Q3 Rate",
    "Q3 Total (INR)",
    "Q4 Quantity",
    "Q4 Rate",
    "Q4 Total (INR)",
    ANNUAL_TOTAL,
    SUBMITTED_BY,
    TIMESTAMP,
];

/// Column widths in Excel character units, parallel to `HEADERS`.
pub const COLUMN_WIDTHS: [f64; 27] = [
    12.0, 30.0, 10.0, 35.0, 30.0, 35.0, 40.0, 25.0, 25.0, 30.0, 12.0, 10.0, // identity + text
    10.0, 12.0, 15.0, // Q1
    10.0, 12.0, 15.0, // Q2
    10.0, 12.0, 15.0, // Q3
    10.0, 12.0, 15.0, // Q4
    20.0, 20.0, 25.0,
];

pub fn quarter_quantity_header(quarter: Quarter) -> &'static str {
    match quarter {
        Quarter::Q1 => "Q1 Quantity",
        Quarter::Q2 => "Q2 Quantity",
        Quarter::Q3 => "Q3 Quantity",
        Quarter::Q4 => "Q4 Quantity",
    }
}

pub fn quarter_rate_header(quarter: Quarter) -> &'static str {
    match quarter {
        Quarter::Q1 => "Q1 Rate",
        Quarter::Q2 => "Q2 Rate",
        Quarter::Q3 => "Q3 Rate",
        Quarter::Q4 => "Q4 Rate",
    }
}

pub fn quarter_total_header(quarter: Quarter) -> &'static str {
    match quarter {
        Quarter::Q1 => "Q1 Total (INR)",
        Quarter::Q2 => "Q2 Total (INR)",
        Quarter::Q3 => "Q3 Total (INR)",
        Quarter::Q4 => "Q4 Total (INR)",
    }
}

// ============================================================================
// IMPORT ALIASES
// ============================================================================

/// A text field read on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportField {
    SchoolName,
    SchoolCode,
    SubmittedBy,
    Goal,
    Strategy,
    LineItem,
    Description,
    Remarks,
    ReviewComments,
    LedgerName,
    LedgerCode,
    Unit,
}

/// Headers tried for each field, in priority order. First non-empty wins.
pub const FIELD_ALIASES: &[(ImportField, &[&str])] = &[
    (ImportField::SchoolName, &[SCHOOL_NAME, "School / Activity / Function Name"]),
    (ImportField::SchoolCode, &[SCHOOL_CODE, "# Code"]),
    (ImportField::SubmittedBy, &[SUBMITTED_BY]),
    (ImportField::Goal, &[GOAL, "Goal Objective"]),
    (ImportField::Strategy, &[STRATEGY, "Activity Cluster"]),
    (ImportField::LineItem, &[LINE_ITEM, "Line Item"]),
    (ImportField::Description, &[DESCRIPTION, "Description"]),
    (ImportField::Remarks, &[REMARKS]),
    (ImportField::ReviewComments, &[REVIEW_COMMENTS, "Review Comments"]),
    (ImportField::LedgerName, &[LEDGER_NAME]),
    (ImportField::LedgerCode, &[LEDGER_CODE]),
    (ImportField::Unit, &[UNIT]),
];

pub fn headers_for(field: ImportField) -> &'static [&'static str] {
    FIELD_ALIASES
        .iter()
        .find(|(candidate, _)| *candidate == field)
        .map(|(_, headers)| *headers)
        .unwrap_or(&[])
}
