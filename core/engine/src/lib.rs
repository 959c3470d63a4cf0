//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the budget engine.
//! CONTEXT: Re-exports the budget tree, its edit operations, the ledger table
//! and the display formatting used by the other crates.

pub mod document;
pub mod edit;
pub mod error;
pub mod ledger;
pub mod model;
pub mod number_format;

// Re-export commonly used types at the crate root
pub use document::{BudgetDocument, ExportContext, ImportedBudget, TIMESTAMP_FORMAT};
pub use edit::{LineItemField, QuarterField};
pub use error::EditError;
pub use ledger::{find_ledger, ledger_code_for, LedgerEntry, LEDGERS};
pub use model::{amount, Activity, Budget, Goal, LineItem, NodeId, Quarter, QuarterDetail};
pub use number_format::{format_inr, format_lakhs, format_rupees, LAKH};
