//! FILENAME: core/engine/src/document.rs
//! PURPOSE: The planner's working state: the budget tree plus the school and
//! submitter fields that travel with every export.
//! CONTEXT: Import results are applied in one step. A failed import never
//! reaches this type, so the current tree stays as it was.

use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};

use crate::model::Budget;

/// Format of the submission timestamp written into exports.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

// ============================================================================
// EXPORT CONTEXT
// ============================================================================

/// Identifying fields repeated on every exported row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportContext {
    pub school_name: String,
    pub school_code: String,
    pub submitted_by: String,
    pub timestamp: String,
}

impl ExportContext {
    pub fn new(
        school_name: impl Into<String>,
        school_code: impl Into<String>,
        submitted_by: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        ExportContext {
            school_name: school_name.into(),
            school_code: school_code.into(),
            submitted_by: submitted_by.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Same as [`ExportContext::new`], stamped with the current local time.
    pub fn now(
        school_name: impl Into<String>,
        school_code: impl Into<String>,
        submitted_by: impl Into<String>,
    ) -> Self {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::new(school_name, school_code, submitted_by, timestamp)
    }
}

// ============================================================================
// IMPORTED BUDGET
// ============================================================================

/// Result of reading a spreadsheet: a fresh tree and whichever contextual
/// fields the first data row carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedBudget {
    pub budget: Budget,
    pub school_name: Option<String>,
    pub school_code: Option<String>,
    pub submitted_by: Option<String>,
}

// ============================================================================
// DOCUMENT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetDocument {
    pub budget: Budget,
    pub school_name: String,
    pub school_code: String,
    pub submitted_by: String,
}

impl BudgetDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a new tree value produced by an edit.
    pub fn replace_budget(&mut self, budget: Budget) {
        self.budget = budget;
    }

    pub fn export_context(&self, timestamp: impl Into<String>) -> ExportContext {
        ExportContext::new(
            self.school_name.clone(),
            self.school_code.clone(),
            self.submitted_by.clone(),
            timestamp,
        )
    }

    pub fn export_context_now(&self) -> ExportContext {
        ExportContext::now(
            self.school_name.clone(),
            self.school_code.clone(),
            self.submitted_by.clone(),
        )
    }

    /// Replaces the tree wholesale. Contextual fields present in the import
    /// overwrite the current ones; absent fields are kept.
    pub fn apply_import(&mut self, imported: ImportedBudget) {
        info!(
            "applying import: {} goals, {} line items",
            imported.budget.goals.len(),
            imported.budget.line_item_count()
        );

        self.budget = imported.budget;
        if let Some(name) = imported.school_name {
            self.school_name = name;
        }
        if let Some(code) = imported.school_code {
            self.school_code = code;
        }
        if let Some(submitted_by) = imported.submitted_by {
            self.submitted_by = submitted_by;
        }
    }
}
