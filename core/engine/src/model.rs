//! FILENAME: core/engine/src/model.rs
//! PURPOSE: Defines the budget hierarchy: Goal -> Activity -> LineItem.
//! CONTEXT: Every node below the root is held behind an `Arc`. An edit copies
//! only the chain from the edited node up to the root (see `edit.rs`) and
//! shares every untouched subtree with the previous tree value.
//! Monetary totals are never stored; they are recomputed from the leaves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// NODE IDS
// ============================================================================

/// Identifier of a goal, activity or line item.
/// Assigned once when the node is created and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generates a fresh random (v4 UUID) id.
    pub fn generate() -> Self {
        NodeId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// QUARTERS
// ============================================================================

/// One of the four fiscal quarters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Display label ("Q1".."Q4"), also the column prefix in spreadsheets.
    pub fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    /// 0-based position of the quarter within the fiscal year.
    pub fn index(self) -> usize {
        match self {
            Quarter::Q1 => 0,
            Quarter::Q2 => 1,
            Quarter::Q3 => 2,
            Quarter::Q4 => 3,
        }
    }
}

/// Rate and quantity planned for a single quarter.
/// Both default to 0 when absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuarterDetail {
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub quantity: f64,
}

impl QuarterDetail {
    pub fn new(rate: f64, quantity: f64) -> Self {
        QuarterDetail { rate, quantity }
    }

    /// `rate * quantity`. A NaN component counts as missing (0).
    /// Negative and infinite values are not validated and pass through.
    pub fn amount(&self) -> f64 {
        or_zero(self.rate) * or_zero(self.quantity)
    }
}

/// Amount of a quarter. Free-function form of [`QuarterDetail::amount`].
pub fn amount(quarter: &QuarterDetail) -> f64 {
    quarter.amount()
}

fn or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

// ============================================================================
// LINE ITEM
// ============================================================================

/// The leaf cost entry of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub review_comments: String,
    #[serde(default)]
    pub ledger_name: String,
    /// Derived from `ledger_name` through the ledger table; empty when the
    /// name is not a known ledger.
    #[serde(default)]
    pub ledger_code: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub q1: QuarterDetail,
    #[serde(default)]
    pub q2: QuarterDetail,
    #[serde(default)]
    pub q3: QuarterDetail,
    #[serde(default)]
    pub q4: QuarterDetail,
}

impl LineItem {
    /// Creates a line item with empty text fields and zeroed quarters.
    pub fn new(id: NodeId) -> Self {
        LineItem {
            id,
            name: String::new(),
            description: String::new(),
            remarks: String::new(),
            review_comments: String::new(),
            ledger_name: String::new(),
            ledger_code: String::new(),
            unit: String::new(),
            q1: QuarterDetail::default(),
            q2: QuarterDetail::default(),
            q3: QuarterDetail::default(),
            q4: QuarterDetail::default(),
        }
    }

    pub fn quarter(&self, quarter: Quarter) -> &QuarterDetail {
        match quarter {
            Quarter::Q1 => &self.q1,
            Quarter::Q2 => &self.q2,
            Quarter::Q3 => &self.q3,
            Quarter::Q4 => &self.q4,
        }
    }

    pub fn quarter_mut(&mut self, quarter: Quarter) -> &mut QuarterDetail {
        match quarter {
            Quarter::Q1 => &mut self.q1,
            Quarter::Q2 => &mut self.q2,
            Quarter::Q3 => &mut self.q3,
            Quarter::Q4 => &mut self.q4,
        }
    }

    pub fn quarter_amount(&self, quarter: Quarter) -> f64 {
        self.quarter(quarter).amount()
    }

    /// Annual total: sum of the four quarter amounts.
    pub fn total(&self) -> f64 {
        Quarter::ALL.iter().map(|q| self.quarter_amount(*q)).sum()
    }
}

// ============================================================================
// ACTIVITY
// ============================================================================

/// A strategy cluster under a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "subActivities", default)]
    pub line_items: Vec<Arc<LineItem>>,
}

impl Activity {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Activity {
            id,
            name: name.into(),
            line_items: Vec::new(),
        }
    }

    pub fn total(&self) -> f64 {
        self.line_items.iter().map(|item| item.total()).sum()
    }

    pub fn find_line_item(&self, item_id: &NodeId) -> Option<&LineItem> {
        self.line_items
            .iter()
            .find(|item| &item.id == item_id)
            .map(|item| item.as_ref())
    }
}

// ============================================================================
// GOAL
// ============================================================================

/// Root-level planning objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub activities: Vec<Arc<Activity>>,
}

impl Goal {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Goal {
            id,
            name: name.into(),
            activities: Vec::new(),
        }
    }

    pub fn total(&self) -> f64 {
        self.activities.iter().map(|activity| activity.total()).sum()
    }

    pub fn find_activity(&self, activity_id: &NodeId) -> Option<&Activity> {
        self.activities
            .iter()
            .find(|activity| &activity.id == activity_id)
            .map(|activity| activity.as_ref())
    }
}

// ============================================================================
// BUDGET
// ============================================================================

/// The whole tree. Cloning is cheap: only the top-level `Arc`s are copied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub goals: Vec<Arc<Goal>>,
}

impl Budget {
    /// Creates an empty budget (zero goals).
    pub fn new() -> Self {
        Budget { goals: Vec::new() }
    }

    /// Builds a budget from owned goals, in the given order.
    pub fn from_goals(goals: Vec<Goal>) -> Self {
        Budget {
            goals: goals.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn grand_total(&self) -> f64 {
        self.goals.iter().map(|goal| goal.total()).sum()
    }

    pub fn find_goal(&self, goal_id: &NodeId) -> Option<&Goal> {
        self.goals
            .iter()
            .find(|goal| &goal.id == goal_id)
            .map(|goal| goal.as_ref())
    }

    /// Visits every line item exactly once, in tree order, together with its
    /// goal and activity.
    pub fn line_items(&self) -> impl Iterator<Item = (&Goal, &Activity, &LineItem)> + '_ {
        self.goals.iter().flat_map(|goal| {
            goal.activities.iter().flat_map(move |activity| {
                activity
                    .line_items
                    .iter()
                    .map(move |item| (goal.as_ref(), activity.as_ref(), item.as_ref()))
            })
        })
    }

    pub fn line_item_count(&self) -> usize {
        self.line_items().count()
    }
}
