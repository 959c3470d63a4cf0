//! FILENAME: core/rollup-engine/src/view.rs
//! Dashboard View - Renderable summary of a budget.
//!
//! Bundles everything the dashboard shows into one value:
//! - Grand total and the four quarter allotments
//! - Goal distribution (goals with a positive total)
//! - Top strategies and top ledgers

use serde::{Deserialize, Serialize};
use budget_engine::{format_lakhs, format_rupees, Budget, Quarter};
use crate::definition::{DashboardOptions, GoalTotal, LedgerTotal, QuarterlyTotals, StrategyTotal, TopN};
use crate::engine::{goal_totals, quarterly_totals, rank_ledgers, rank_strategies, top};

/// One quarter's allotment, with display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterAllotment {
    pub label: String,
    pub value: f64,
    /// e.g. "₹1,23,456".
    pub display: String,
    /// e.g. "1.23" (lakhs).
    pub display_lakhs: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub grand_total: f64,
    pub grand_total_display: String,
    pub grand_total_lakhs: String,
    pub quarterly: QuarterlyTotals,
    pub quarters: Vec<QuarterAllotment>,
    pub goals: Vec<GoalTotal>,
    pub top_strategies: TopN<StrategyTotal>,
    pub top_ledgers: TopN<LedgerTotal>,
}

impl DashboardView {
    /// True when there is nothing to chart in the goal distribution.
    pub fn has_distribution(&self) -> bool {
        !self.goals.is_empty()
    }
}

/// Computes the dashboard for a budget.
/// The grand total is the sum of the quarter totals, so both always agree.
pub fn build_dashboard(budget: &Budget, options: &DashboardOptions) -> DashboardView {
    let quarterly = quarterly_totals(budget);
    let grand_total = quarterly.total();

    let quarters = Quarter::ALL
        .iter()
        .map(|quarter| {
            let value = quarterly.get(*quarter);
            QuarterAllotment {
                label: quarter.label().to_string(),
                value,
                display: format_rupees(value),
                display_lakhs: format_lakhs(value),
            }
        })
        .collect();

    DashboardView {
        grand_total,
        grand_total_display: format_rupees(grand_total),
        grand_total_lakhs: format_lakhs(grand_total),
        quarterly,
        quarters,
        goals: goal_totals(budget),
        top_strategies: top(rank_strategies(budget), options.top_n),
        top_ledgers: top(rank_ledgers(budget), options.top_n),
    }
}
