//! FILENAME: core/rollup-engine/src/engine.rs
//! Rollup Engine - Cross-cutting aggregates over a budget tree.
//!
//! Every function here is pure: it reads the tree, never mutates it, and
//! returns the same output when called twice on the same tree. Nothing is
//! cached; totals are recomputed from the line items on every call.
//!
//! Rankings:
//! 1. Bucket line items (per ledger) or walk nodes (per goal / strategy)
//! 2. Keep buckets in first-seen order
//! 3. Stable sort descending by total, so ties keep first-seen order
//! 4. Truncate to the requested top-N

use std::cmp::Ordering;
use rustc_hash::FxHashMap;
use budget_engine::{Budget, Quarter};
use crate::definition::{
    GoalTotal, LedgerTotal, QuarterlyTotals, StrategyTotal, TopN, DASHBOARD_TOP_N,
    UNTITLED_GOAL, UNTITLED_STRATEGY,
};

// ============================================================================
// TOTALS
// ============================================================================

/// Per-quarter sums across every line item, in a single pass.
pub fn quarterly_totals(budget: &Budget) -> QuarterlyTotals {
    let mut totals = QuarterlyTotals::default();
    for (_, _, item) in budget.line_items() {
        for quarter in Quarter::ALL {
            totals.add(quarter, item.quarter_amount(quarter));
        }
    }
    totals
}

/// Sum of every goal total.
pub fn grand_total(budget: &Budget) -> f64 {
    budget.grand_total()
}

// ============================================================================
// LEDGERS
// ============================================================================

/// All ledgers that carry at least one line item, sorted descending by total.
/// Line items with an empty ledger name are left out entirely.
pub fn rank_ledgers(budget: &Budget) -> Vec<LedgerTotal> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut buckets: Vec<LedgerTotal> = Vec::new();

    for (_, _, item) in budget.line_items() {
        if item.ledger_name.is_empty() {
            continue;
        }

        let slot = *index.entry(item.ledger_name.as_str()).or_insert_with(|| {
            buckets.push(LedgerTotal {
                name: item.ledger_name.clone(),
                code: item.ledger_code.clone(),
                total: 0.0,
            });
            buckets.len() - 1
        });
        buckets[slot].total += item.total();
    }

    buckets.sort_by(|a, b| descending(a.total, b.total));
    buckets
}

/// Top ledgers for the dashboard.
pub fn ledger_totals(budget: &Budget) -> TopN<LedgerTotal> {
    top(rank_ledgers(budget), DASHBOARD_TOP_N)
}

// ============================================================================
// GOALS
// ============================================================================

/// Goal totals in tree order, keeping only goals with a positive total.
pub fn goal_totals(budget: &Budget) -> Vec<GoalTotal> {
    budget
        .goals
        .iter()
        .map(|goal| GoalTotal {
            name: display_name(&goal.name, UNTITLED_GOAL),
            total: goal.total(),
        })
        .filter(|goal| goal.total > 0.0)
        .collect()
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Activity totals with a positive total, sorted descending.
pub fn rank_strategies(budget: &Budget) -> Vec<StrategyTotal> {
    let mut strategies: Vec<StrategyTotal> = budget
        .goals
        .iter()
        .flat_map(|goal| {
            goal.activities.iter().map(move |activity| StrategyTotal {
                goal_name: display_name(&goal.name, UNTITLED_GOAL),
                name: display_name(&activity.name, UNTITLED_STRATEGY),
                total: activity.total(),
            })
        })
        .filter(|strategy| strategy.total > 0.0)
        .collect();

    strategies.sort_by(|a, b| descending(a.total, b.total));
    strategies
}

/// Top strategies for the dashboard.
pub fn strategy_totals(budget: &Budget) -> TopN<StrategyTotal> {
    top(rank_strategies(budget), DASHBOARD_TOP_N)
}

// ============================================================================
// HELPERS
// ============================================================================

/// Keeps the first `n` entries of an already ranked list.
pub fn top<T>(ranked: Vec<T>, n: usize) -> TopN<T> {
    ranked.into_iter().take(n).collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

fn display_name(name: &str, fallback: &str) -> String {
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
