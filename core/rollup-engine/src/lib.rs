//! FILENAME: core/rollup-engine/src/lib.rs
//! Budget rollups for dashboards and reports.
//!
//! This crate computes aggregates that cut across the budget hierarchy. It
//! depends on `budget-engine` only for the tree types and node totals.
//!
//! Layers:
//! - `definition`: Result types and options (WHAT we report)
//! - `engine`: Aggregation functions (HOW we compute)
//! - `view`: Dashboard bundle with display strings (WHAT we display)
//! - `insights`: Summary + prompt for the external text generator

pub mod definition;
pub mod engine;
pub mod insights;
pub mod view;

pub use definition::*;
pub use engine::{
    goal_totals, grand_total, ledger_totals, quarterly_totals, rank_ledgers,
    rank_strategies, strategy_totals, top,
};
pub use insights::{
    budget_insights, build_prompt, summarize, ActivitySummary, GoalSummary, InsightError,
    InsightProvider, NO_INSIGHTS, PROVIDER_UNAVAILABLE,
};
pub use view::{build_dashboard, DashboardView, QuarterAllotment};
