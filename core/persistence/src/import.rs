//! FILENAME: core/persistence/src/import.rs
//! PURPOSE: Rebuilds a budget tree from header-keyed records.
//! CONTEXT: Records are grouped by name, not by id. Goals are matched by
//! exact name across the whole sheet and activities by exact name within
//! their goal; both are created on first sight and keep first-seen order.
//! Every record becomes a new line item. Ids are freshly generated, so two
//! distinct goals (or activities) that share a name merge into one.

use std::collections::HashMap;
use std::sync::Arc;

use budget_engine::{Activity, Budget, Goal, ImportedBudget, LineItem, NodeId, Quarter, QuarterDetail};
use log::{debug, info};

use crate::columns::{headers_for, quarter_quantity_header, quarter_rate_header, ImportField};
use crate::{Record, Table, TableValue};

/// Goal name used when a row names none.
pub const DEFAULT_GOAL: &str = "General";
/// Strategy name used when a row names none.
pub const DEFAULT_STRATEGY: &str = "Standard";
/// Line item name used when a row names none.
pub const DEFAULT_LINE_ITEM: &str = "Misc";

/// Rebuilds a tree from a table (header row + data rows).
pub fn import_table(table: &Table) -> ImportedBudget {
    rebuild(&table.records())
}

/// Rebuilds a tree from records. Zero records give an empty tree and no
/// contextual fields. School name, code and submitter come from the first
/// record only.
pub fn rebuild(records: &[Record]) -> ImportedBudget {
    let Some(first) = records.first() else {
        return ImportedBudget::default();
    };

    let school_name = resolve_text(first, ImportField::SchoolName);
    let school_code = resolve_text(first, ImportField::SchoolCode);
    let submitted_by = resolve_text(first, ImportField::SubmittedBy);

    let mut goals: Vec<Goal> = Vec::new();
    let mut goal_index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let goal_name = resolve_or(record, ImportField::Goal, DEFAULT_GOAL);
        let strategy_name = resolve_or(record, ImportField::Strategy, DEFAULT_STRATEGY);
        let item_name = resolve_or(record, ImportField::LineItem, DEFAULT_LINE_ITEM);

        let slot = match goal_index.get(&goal_name) {
            Some(slot) => *slot,
            None => {
                goals.push(Goal::new(NodeId::generate(), goal_name.clone()));
                goal_index.insert(goal_name, goals.len() - 1);
                goals.len() - 1
            }
        };
        let goal = &mut goals[slot];

        let position = match goal.activities.iter().position(|a| a.name == strategy_name) {
            Some(position) => position,
            None => {
                goal.activities
                    .push(Arc::new(Activity::new(NodeId::generate(), strategy_name)));
                goal.activities.len() - 1
            }
        };

        // Freshly built nodes are uniquely owned, so make_mut does not clone.
        Arc::make_mut(&mut goal.activities[position])
            .line_items
            .push(Arc::new(line_item_from(record, item_name)));
    }

    let budget = Budget::from_goals(goals);
    info!(
        "rebuilt {} records into {} goals",
        records.len(),
        budget.goals.len()
    );

    ImportedBudget {
        budget,
        school_name,
        school_code,
        submitted_by,
    }
}

fn line_item_from(record: &Record, name: String) -> LineItem {
    let mut item = LineItem::new(NodeId::generate());
    item.name = name;
    item.description = resolve_or(record, ImportField::Description, "");
    item.remarks = resolve_or(record, ImportField::Remarks, "");
    item.review_comments = resolve_or(record, ImportField::ReviewComments, "");
    item.ledger_name = resolve_or(record, ImportField::LedgerName, "");
    item.ledger_code = resolve_or(record, ImportField::LedgerCode, "");
    item.unit = resolve_or(record, ImportField::Unit, "");

    for quarter in Quarter::ALL {
        *item.quarter_mut(quarter) = QuarterDetail {
            rate: number_at(record, quarter_rate_header(quarter)),
            quantity: number_at(record, quarter_quantity_header(quarter)),
        };
    }

    item
}

// ============================================================================
// FIELD RESOLUTION
// ============================================================================

/// First non-empty value among the field's headers, as text. A `FALSE`
/// cell counts as missing.
fn resolve_text(record: &Record, field: ImportField) -> Option<String> {
    let headers = headers_for(field);
    for (position, header) in headers.iter().enumerate() {
        let value = record
            .get(*header)
            .filter(|value| !value.is_empty() && **value != TableValue::Boolean(false));
        if let Some(value) = value {
            if position > 0 {
                debug!("{:?} read from alias column {:?}", field, header);
            }
            return Some(value.display_value());
        }
    }
    None
}

fn resolve_or(record: &Record, field: ImportField, default: &str) -> String {
    resolve_text(record, field).unwrap_or_else(|| default.to_string())
}

fn number_at(record: &Record, header: &str) -> f64 {
    record.get(header).map(parse_number).unwrap_or(0.0)
}

/// Numeric value of a cell. Missing, blank and non-numeric values are 0.
pub fn parse_number(value: &TableValue) -> f64 {
    let parsed = match value {
        TableValue::Empty => 0.0,
        TableValue::Number(n) => *n,
        TableValue::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        TableValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or_else(|_| {
                    debug!("non-numeric cell {:?} read as 0", s);
                    0.0
                })
            }
        }
    };

    if parsed.is_nan() {
        0.0
    } else {
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::export_table;
    use budget_engine::ExportContext;

    fn record(pairs: &[(&str, TableValue)]) -> Record {
        pairs
            .iter()
            .map(|(header, value)| (header.to_string(), value.clone()))
            .collect()
    }

    fn text(s: &str) -> TableValue {
        TableValue::Text(s.to_string())
    }

    #[test]
    fn test_zero_records_give_empty_budget() {
        let imported = rebuild(&[]);
        assert!(imported.budget.is_empty());
        assert_eq!(imported.school_name, None);
        assert_eq!(imported.school_code, None);
        assert_eq!(imported.submitted_by, None);
        assert!(import_table(&Table::default()).budget.is_empty());
    }

    #[test]
    fn test_grouping_by_name_in_first_seen_order() {
        let records = vec![
            record(&[("Goal", text("B")), ("Strategy", text("x")), ("Activity / Cost Head", text("1"))]),
            record(&[("Goal", text("A")), ("Strategy", text("y")), ("Activity / Cost Head", text("2"))]),
            record(&[("Goal", text("B")), ("Strategy", text("z")), ("Activity / Cost Head", text("3"))]),
            record(&[("Goal", text("B")), ("Strategy", text("x")), ("Activity / Cost Head", text("4"))]),
        ];
        let budget = rebuild(&records).budget;

        assert_eq!(budget.goals.len(), 2);
        assert_eq!(budget.goals[0].name, "B");
        assert_eq!(budget.goals[1].name, "A");

        let b = &budget.goals[0];
        let strategies: Vec<&str> = b.activities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(strategies, vec!["x", "z"]);
        let items: Vec<&str> = b.activities[0].line_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(items, vec!["1", "4"]);
    }

    #[test]
    fn test_defaults_for_missing_names() {
        let records = vec![record(&[("Q1 Rate", TableValue::Number(5.0))])];
        let budget = rebuild(&records).budget;

        assert_eq!(budget.goals[0].name, DEFAULT_GOAL);
        assert_eq!(budget.goals[0].activities[0].name, DEFAULT_STRATEGY);
        let item = &budget.goals[0].activities[0].line_items[0];
        assert_eq!(item.name, DEFAULT_LINE_ITEM);
        assert_eq!(item.q1.rate, 5.0);
        assert_eq!(item.q1.quantity, 0.0);
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_header_aliases() {
        let records = vec![record(&[
            ("School / Activity / Function Name", text("School of Arts")),
            ("# Code", text("SA")),
            ("Goal Objective", text("Access")),
            ("Activity Cluster", text("Scholarships")),
            ("Line Item", text("Merit awards")),
            ("Description", text("Top 10 students")),
            ("Review Comments", text("Fine")),
        ])];
        let imported = rebuild(&records);

        assert_eq!(imported.school_name.as_deref(), Some("School of Arts"));
        assert_eq!(imported.school_code.as_deref(), Some("SA"));
        assert_eq!(imported.submitted_by, None);

        let goal = &imported.budget.goals[0];
        assert_eq!(goal.name, "Access");
        assert_eq!(goal.activities[0].name, "Scholarships");
        let item = &goal.activities[0].line_items[0];
        assert_eq!(item.name, "Merit awards");
        assert_eq!(item.description, "Top 10 students");
        assert_eq!(item.review_comments, "Fine");
    }

    #[test]
    fn test_primary_header_wins_over_alias() {
        let records = vec![record(&[("Goal", text("Primary")), ("Goal Objective", text("Alias"))])];
        assert_eq!(rebuild(&records).budget.goals[0].name, "Primary");

        let records = vec![record(&[("Goal", text("")), ("Goal Objective", text("Alias"))])];
        assert_eq!(rebuild(&records).budget.goals[0].name, "Alias");
    }

    #[test]
    fn test_false_cell_falls_back() {
        let records = vec![record(&[
            ("Goal", TableValue::Boolean(false)),
            ("Goal Objective", text("Alias")),
            ("Strategy", TableValue::Boolean(false)),
            ("Remarks", TableValue::Boolean(true)),
        ])];
        let budget = rebuild(&records).budget;

        assert_eq!(budget.goals[0].name, "Alias");
        assert_eq!(budget.goals[0].activities[0].name, DEFAULT_STRATEGY);
        assert_eq!(budget.goals[0].activities[0].line_items[0].remarks, "TRUE");
    }

    #[test]
    fn test_context_from_first_record_only() {
        let records = vec![
            record(&[("Goal", text("G"))]),
            record(&[("Goal", text("G")), ("Submitted By", text("Late"))]),
        ];
        assert_eq!(rebuild(&records).submitted_by, None);
    }

    #[test]
    fn test_numeric_cells_as_text_are_parsed() {
        let records = vec![record(&[
            ("Q2 Rate", text(" 1500.5 ")),
            ("Q2 Quantity", text("2")),
            ("Q3 Rate", text("abc")),
            ("Q3 Quantity", text("4")),
            ("Ledger Code", TableValue::Number(1008.0)),
        ])];
        let item = rebuild(&records).budget.goals[0].activities[0].line_items[0].clone();

        assert_eq!(item.q2.rate, 1500.5);
        assert_eq!(item.q2.quantity, 2.0);
        assert_eq!(item.q3.rate, 0.0);
        assert_eq!(item.q3.amount(), 0.0);
        assert_eq!(item.ledger_code, "1008");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&TableValue::Empty), 0.0);
        assert_eq!(parse_number(&text("")), 0.0);
        assert_eq!(parse_number(&text("   ")), 0.0);
        assert_eq!(parse_number(&text("1e3")), 1000.0);
        assert_eq!(parse_number(&text("-7")), -7.0);
        assert_eq!(parse_number(&text("NaN")), 0.0);
        assert_eq!(parse_number(&TableValue::Number(f64::NAN)), 0.0);
        assert_eq!(parse_number(&TableValue::Boolean(true)), 1.0);
    }

    #[test]
    fn test_duplicate_names_merge() {
        let mut first = Goal::new(NodeId::generate(), "Same");
        let mut activity = Activity::new(NodeId::generate(), "S");
        let mut item = LineItem::new(NodeId::generate());
        item.name = "one".to_string();
        activity.line_items.push(Arc::new(item));
        first.activities.push(Arc::new(activity.clone()));

        let mut second = Goal::new(NodeId::generate(), "Same");
        second.activities.push(Arc::new(activity));

        let budget = Budget::from_goals(vec![first, second]);
        let table = export_table(&budget, &ExportContext::default());
        let reimported = import_table(&table).budget;

        assert_eq!(reimported.goals.len(), 1);
        assert_eq!(reimported.goals[0].activities.len(), 1);
        assert_eq!(reimported.goals[0].activities[0].line_items.len(), 2);
    }
}
