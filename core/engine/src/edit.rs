//! FILENAME: core/engine/src/edit.rs
//! PURPOSE: Replace-on-write edits of the budget tree.
//! CONTEXT: Every edit takes `&Budget` and returns a new `Budget`. The input
//! tree is never touched. `Arc::make_mut` clones only the nodes on the path
//! from the root to the edited node; siblings and unrelated subtrees stay
//! shared between the old and the new value.

use std::sync::Arc;

use log::debug;

use crate::error::EditError;
use crate::ledger::ledger_code_for;
use crate::model::{Activity, Budget, Goal, LineItem, NodeId, Quarter};

/// Editable text field of a line item.
/// The ledger code is not listed: it always follows the ledger name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemField {
    Name,
    Description,
    Remarks,
    ReviewComments,
    LedgerName,
    Unit,
}

/// Which half of a quarter's (rate, quantity) pair to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarterField {
    Rate,
    Quantity,
}

impl Budget {
    // ------------------------------------------------------------------------
    // Goals
    // ------------------------------------------------------------------------

    /// Appends an empty goal. Returns the new tree and the goal's id.
    pub fn add_goal(&self) -> (Budget, NodeId) {
        let id = NodeId::generate();
        let mut next = self.clone();
        next.goals.push(Arc::new(Goal::new(id.clone(), String::new())));
        (next, id)
    }

    pub fn rename_goal(&self, goal_id: &NodeId, name: impl Into<String>) -> Result<Budget, EditError> {
        let mut next = self.clone();
        next.goal_mut(goal_id)?.name = name.into();
        Ok(next)
    }

    /// Removes a goal together with all of its activities and line items.
    pub fn remove_goal(&self, goal_id: &NodeId) -> Result<Budget, EditError> {
        let index = self
            .goals
            .iter()
            .position(|goal| &goal.id == goal_id)
            .ok_or_else(|| EditError::GoalNotFound(goal_id.clone()))?;

        let mut next = self.clone();
        next.goals.remove(index);
        debug!("removed goal {}", goal_id);
        Ok(next)
    }

    // ------------------------------------------------------------------------
    // Activities
    // ------------------------------------------------------------------------

    /// Appends an empty activity to a goal.
    pub fn add_activity(&self, goal_id: &NodeId) -> Result<(Budget, NodeId), EditError> {
        let id = NodeId::generate();
        let mut next = self.clone();
        next.goal_mut(goal_id)?
            .activities
            .push(Arc::new(Activity::new(id.clone(), String::new())));
        Ok((next, id))
    }

    pub fn rename_activity(
        &self,
        goal_id: &NodeId,
        activity_id: &NodeId,
        name: impl Into<String>,
    ) -> Result<Budget, EditError> {
        let mut next = self.clone();
        next.activity_mut(goal_id, activity_id)?.name = name.into();
        Ok(next)
    }

    pub fn remove_activity(&self, goal_id: &NodeId, activity_id: &NodeId) -> Result<Budget, EditError> {
        let mut next = self.clone();
        let goal = next.goal_mut(goal_id)?;
        let index = goal
            .activities
            .iter()
            .position(|activity| &activity.id == activity_id)
            .ok_or_else(|| EditError::ActivityNotFound(activity_id.clone()))?;
        goal.activities.remove(index);
        debug!("removed activity {} from goal {}", activity_id, goal_id);
        Ok(next)
    }

    // ------------------------------------------------------------------------
    // Line items
    // ------------------------------------------------------------------------

    /// Appends a line item with empty text and zeroed quarters.
    pub fn add_line_item(&self, goal_id: &NodeId, activity_id: &NodeId) -> Result<(Budget, NodeId), EditError> {
        let id = NodeId::generate();
        let mut next = self.clone();
        next.activity_mut(goal_id, activity_id)?
            .line_items
            .push(Arc::new(LineItem::new(id.clone())));
        Ok((next, id))
    }

    pub fn remove_line_item(
        &self,
        goal_id: &NodeId,
        activity_id: &NodeId,
        item_id: &NodeId,
    ) -> Result<Budget, EditError> {
        let mut next = self.clone();
        let activity = next.activity_mut(goal_id, activity_id)?;
        let index = activity
            .line_items
            .iter()
            .position(|item| &item.id == item_id)
            .ok_or_else(|| EditError::LineItemNotFound(item_id.clone()))?;
        activity.line_items.remove(index);
        Ok(next)
    }

    /// Sets one text field of a line item. Setting the ledger name also
    /// re-derives the ledger code (empty when the name is unknown).
    pub fn set_line_item_field(
        &self,
        goal_id: &NodeId,
        activity_id: &NodeId,
        item_id: &NodeId,
        field: LineItemField,
        value: impl Into<String>,
    ) -> Result<Budget, EditError> {
        let value = value.into();
        let mut next = self.clone();
        let item = next.line_item_mut(goal_id, activity_id, item_id)?;

        match field {
            LineItemField::Name => item.name = value,
            LineItemField::Description => item.description = value,
            LineItemField::Remarks => item.remarks = value,
            LineItemField::ReviewComments => item.review_comments = value,
            LineItemField::Unit => item.unit = value,
            LineItemField::LedgerName => item.select_ledger(value),
        }

        Ok(next)
    }

    /// Sets the rate or quantity of one quarter of a line item.
    pub fn set_quarter_value(
        &self,
        goal_id: &NodeId,
        activity_id: &NodeId,
        item_id: &NodeId,
        quarter: Quarter,
        field: QuarterField,
        value: f64,
    ) -> Result<Budget, EditError> {
        let mut next = self.clone();
        let detail = next
            .line_item_mut(goal_id, activity_id, item_id)?
            .quarter_mut(quarter);

        match field {
            QuarterField::Rate => detail.rate = value,
            QuarterField::Quantity => detail.quantity = value,
        }

        Ok(next)
    }

    // ------------------------------------------------------------------------
    // Path copy helpers
    // ------------------------------------------------------------------------

    fn goal_mut(&mut self, goal_id: &NodeId) -> Result<&mut Goal, EditError> {
        let slot = self
            .goals
            .iter_mut()
            .find(|goal| &goal.id == goal_id)
            .ok_or_else(|| EditError::GoalNotFound(goal_id.clone()))?;
        Ok(Arc::make_mut(slot))
    }

    fn activity_mut(&mut self, goal_id: &NodeId, activity_id: &NodeId) -> Result<&mut Activity, EditError> {
        let slot = self
            .goal_mut(goal_id)?
            .activities
            .iter_mut()
            .find(|activity| &activity.id == activity_id)
            .ok_or_else(|| EditError::ActivityNotFound(activity_id.clone()))?;
        Ok(Arc::make_mut(slot))
    }

    fn line_item_mut(
        &mut self,
        goal_id: &NodeId,
        activity_id: &NodeId,
        item_id: &NodeId,
    ) -> Result<&mut LineItem, EditError> {
        let slot = self
            .activity_mut(goal_id, activity_id)?
            .line_items
            .iter_mut()
            .find(|item| &item.id == item_id)
            .ok_or_else(|| EditError::LineItemNotFound(item_id.clone()))?;
        Ok(Arc::make_mut(slot))
    }
}

impl LineItem {
    /// Sets the ledger name and fills the code from the ledger table.
    pub fn select_ledger(&mut self, name: impl Into<String>) {
        self.ledger_name = name.into();
        self.ledger_code = match ledger_code_for(&self.ledger_name) {
            Some(code) => code.to_string(),
            None => {
                if !self.ledger_name.is_empty() {
                    debug!("unknown ledger {:?}, leaving code empty", self.ledger_name);
                }
                String::new()
            }
        };
    }
}
