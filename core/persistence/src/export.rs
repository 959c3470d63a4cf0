//! FILENAME: core/persistence/src/export.rs
//! PURPOSE: Flattens a budget tree into one record per line item.
//! CONTEXT: Row order is tree order (goal, activity, line item, each in
//! array order). A tree without line items flattens to zero records.

use budget_engine::{Budget, ExportContext, Quarter};
use serde::{Deserialize, Serialize};

use crate::columns::HEADERS;
use crate::{Table, TableValue};

/// Quantity, rate and computed amount of one quarter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuarterCells {
    pub quantity: f64,
    pub rate: f64,
    pub total: f64,
}

/// A flattened line item, one spreadsheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub school_code: String,
    pub school_name: String,
    pub serial_no: String,
    pub goal: String,
    pub strategy: String,
    pub line_item: String,
    pub description: String,
    pub remarks: String,
    pub review_comments: String,
    pub ledger_name: String,
    pub ledger_code: String,
    pub unit: String,
    pub quarters: [QuarterCells; 4],
    pub annual_total: f64,
    pub submitted_by: String,
    pub timestamp: String,
}

impl BudgetRecord {
    /// Cells in `HEADERS` order.
    pub fn to_row(&self) -> Vec<TableValue> {
        let mut row = Vec::with_capacity(HEADERS.len());
        row.push(text(&self.school_code));
        row.push(text(&self.school_name));
        row.push(text(&self.serial_no));
        row.push(text(&self.goal));
        row.push(text(&self.strategy));
        row.push(text(&self.line_item));
        row.push(text(&self.description));
        row.push(text(&self.remarks));
        row.push(text(&self.review_comments));
        row.push(text(&self.ledger_name));
        row.push(text(&self.ledger_code));
        row.push(text(&self.unit));
        for quarter in &self.quarters {
            row.push(TableValue::Number(quarter.quantity));
            row.push(TableValue::Number(quarter.rate));
            row.push(TableValue::Number(quarter.total));
        }
        row.push(TableValue::Number(self.annual_total));
        row.push(text(&self.submitted_by));
        row.push(text(&self.timestamp));
        row
    }
}

fn text(value: &str) -> TableValue {
    TableValue::Text(value.to_string())
}

/// Serial label "{goal}.{LETTER}.{item}", e.g. `1.A.1`. Indices are 0-based.
///
/// The letter is the character at `97 + activity_index` uppercased, so
/// positions past 25 run beyond 'Z' into the following code points.
pub fn serial_label(goal_index: usize, activity_index: usize, item_index: usize) -> String {
    let letter: String = u32::try_from(97 + activity_index)
        .ok()
        .and_then(char::from_u32)
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();
    format!("{}.{}.{}", goal_index + 1, letter, item_index + 1)
}

/// One record per line item, in tree order.
pub fn flatten(budget: &Budget, context: &ExportContext) -> Vec<BudgetRecord> {
    let mut records = Vec::new();

    for (g, goal) in budget.goals.iter().enumerate() {
        for (a, activity) in goal.activities.iter().enumerate() {
            for (s, item) in activity.line_items.iter().enumerate() {
                let quarters = Quarter::ALL.map(|quarter| {
                    let detail = item.quarter(quarter);
                    QuarterCells {
                        quantity: detail.quantity,
                        rate: detail.rate,
                        total: detail.amount(),
                    }
                });

                records.push(BudgetRecord {
                    school_code: context.school_code.clone(),
                    school_name: context.school_name.clone(),
                    serial_no: serial_label(g, a, s),
                    goal: goal.name.clone(),
                    strategy: activity.name.clone(),
                    line_item: item.name.clone(),
                    description: item.description.clone(),
                    remarks: item.remarks.clone(),
                    review_comments: item.review_comments.clone(),
                    ledger_name: item.ledger_name.clone(),
                    ledger_code: item.ledger_code.clone(),
                    unit: item.unit.clone(),
                    quarters,
                    annual_total: item.total(),
                    submitted_by: context.submitted_by.clone(),
                    timestamp: context.timestamp.clone(),
                });
            }
        }
    }

    records
}

/// The flattened budget as a header + rows table.
pub fn export_table(budget: &Budget, context: &ExportContext) -> Table {
    let mut table = Table::new(HEADERS.iter().map(|h| h.to_string()).collect());
    table.rows = flatten(budget, context).iter().map(BudgetRecord::to_row).collect();
    table
}
