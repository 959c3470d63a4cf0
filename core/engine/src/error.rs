//! FILENAME: core/engine/src/error.rs

use crate::model::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Goal not found: {0}")]
    GoalNotFound(NodeId),

    #[error("Activity not found: {0}")]
    ActivityNotFound(NodeId),

    #[error("Line item not found: {0}")]
    LineItemNotFound(NodeId),
}
