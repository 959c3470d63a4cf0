//! FILENAME: core/rollup-engine/src/definition.rs
//! Rollup Definition - The result types and options of the aggregations.
//!
//! These structures are designed to be:
//! - Serializable (sent to whatever renders the dashboard)
//! - Plain values, detached from the tree they were computed from

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use budget_engine::Quarter;

/// Number of entries kept in the dashboard rankings.
pub const DASHBOARD_TOP_N: usize = 5;

/// A ranking short enough for the dashboard to keep inline.
pub type TopN<T> = SmallVec<[T; DASHBOARD_TOP_N]>;

/// Label shown for a goal whose name is empty.
pub const UNTITLED_GOAL: &str = "Untitled Goal";

/// Label shown for a strategy whose name is empty.
pub const UNTITLED_STRATEGY: &str = "Untitled Strategy";

// ============================================================================
// OPTIONS
// ============================================================================

/// Knobs for building a dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOptions {
    /// How many strategies and ledgers to keep in the rankings.
    pub top_n: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        DashboardOptions {
            top_n: DASHBOARD_TOP_N,
        }
    }
}

// ============================================================================
// QUARTERLY TOTALS
// ============================================================================

/// Sum of amounts per quarter across the whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuarterlyTotals {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub q4: f64,
}

impl QuarterlyTotals {
    pub fn get(&self, quarter: Quarter) -> f64 {
        match quarter {
            Quarter::Q1 => self.q1,
            Quarter::Q2 => self.q2,
            Quarter::Q3 => self.q3,
            Quarter::Q4 => self.q4,
        }
    }

    pub fn add(&mut self, quarter: Quarter, value: f64) {
        match quarter {
            Quarter::Q1 => self.q1 += value,
            Quarter::Q2 => self.q2 += value,
            Quarter::Q3 => self.q3 += value,
            Quarter::Q4 => self.q4 += value,
        }
    }

    /// q1 + q2 + q3 + q4.
    pub fn total(&self) -> f64 {
        self.q1 + self.q2 + self.q3 + self.q4
    }
}

// ============================================================================
// RANKED TOTALS
// ============================================================================

/// Total of all line items booked against one ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotal {
    pub name: String,
    pub code: String,
    pub total: f64,
}

/// Total of one goal, for the distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalTotal {
    pub name: String,
    pub total: f64,
}

/// Total of one activity (strategy cluster).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyTotal {
    /// Name of the goal the strategy belongs to.
    pub goal_name: String,
    pub name: String,
    pub total: f64,
}
