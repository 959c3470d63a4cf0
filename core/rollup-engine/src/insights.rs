//! FILENAME: core/rollup-engine/src/insights.rs
//! Budget insights - summary handed to an external text-generation service.
//!
//! The service itself is a collaborator behind the `InsightProvider` trait:
//! it receives a prompt embedding the JSON summary and returns free text.
//! This module only builds the summary and prompt and maps failures to the
//! fixed fallback messages.

use log::{info, warn};
use serde::Serialize;
use thiserror::Error;
use budget_engine::{Activity, Budget, Quarter};
use crate::definition::QuarterlyTotals;

/// Returned when the provider produced an empty answer.
pub const NO_INSIGHTS: &str = "No insights available.";

/// Returned when the provider failed.
pub const PROVIDER_UNAVAILABLE: &str =
    "The AI consultant is currently unavailable. Please verify API connectivity.";

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Insight provider unavailable: {0}")]
    Unavailable(String),

    #[error("Summary serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// External text generator.
pub trait InsightProvider {
    fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSummary {
    pub goal: String,
    pub activities: Vec<ActivitySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub name: String,
    pub quarterly_spend: QuarterlyTotals,
}

/// Per-goal, per-activity quarterly spend, in tree order.
pub fn summarize(budget: &Budget) -> Vec<GoalSummary> {
    budget
        .goals
        .iter()
        .map(|goal| GoalSummary {
            goal: goal.name.clone(),
            activities: goal
                .activities
                .iter()
                .map(|activity| ActivitySummary {
                    name: activity.name.clone(),
                    quarterly_spend: activity_quarterly(activity),
                })
                .collect(),
        })
        .collect()
}

fn activity_quarterly(activity: &Activity) -> QuarterlyTotals {
    let mut totals = QuarterlyTotals::default();
    for item in &activity.line_items {
        for quarter in Quarter::ALL {
            totals.add(quarter, item.quarter_amount(quarter));
        }
    }
    totals
}

/// Builds the analyst prompt around the serialized summary.
pub fn build_prompt(summary: &[GoalSummary]) -> Result<String, InsightError> {
    let context = serde_json::to_string(summary)?;
    Ok(format!(
        "Act as a senior CFO and Strategic Analyst. Analyze this SBU budget hierarchy \
which includes detailed quarterly disbursements based on unit rates and quantities.\n\n\
Hierarchy Context: {context}\n\n\
Please provide:\n\
1. A critical audit of the spend phasing across the 4 quarters.\n\
2. Identification of any 'lumpy' spend or front-loading risks.\n\
3. Strategic suggestions on unit cost optimization or activity alignment.\n\n\
Format as professional Markdown. Be concise and hard-hitting."
    ))
}

/// Asks the provider for insights. Returns `None` for an empty budget (the
/// provider is not called). Provider failures become the fallback message.
pub fn budget_insights<P: InsightProvider + ?Sized>(budget: &Budget, provider: &P) -> Option<String> {
    if budget.is_empty() {
        return None;
    }

    let response = build_prompt(&summarize(budget)).and_then(|prompt| provider.generate(&prompt));

    match response {
        Ok(text) if text.is_empty() => Some(NO_INSIGHTS.to_string()),
        Ok(text) => {
            info!("insights received ({} chars)", text.len());
            Some(text)
        }
        Err(e) => {
            warn!("insight provider failed: {}", e);
            Some(PROVIDER_UNAVAILABLE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_engine::QuarterField;
    use std::cell::RefCell;

    struct Recording {
        prompts: RefCell<Vec<String>>,
        answer: Result<String, String>,
    }

    impl Recording {
        fn answering(answer: &str) -> Self {
            Recording {
                prompts: RefCell::new(Vec::new()),
                answer: Ok(answer.to_string()),
            }
        }

        fn failing() -> Self {
            Recording {
                prompts: RefCell::new(Vec::new()),
                answer: Err("timeout".to_string()),
            }
        }
    }

    impl InsightProvider for Recording {
        fn generate(&self, prompt: &str) -> Result<String, InsightError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.answer.clone().map_err(InsightError::Unavailable)
        }
    }

    fn create_test_budget() -> Budget {
        let (budget, g) = Budget::new().add_goal();
        let budget = budget.rename_goal(&g, "Research").unwrap();
        let (budget, a) = budget.add_activity(&g).unwrap();
        let budget = budget.rename_activity(&g, &a, "Seminars").unwrap();
        let (budget, i) = budget.add_line_item(&g, &a).unwrap();
        budget
            .set_quarter_value(&g, &a, &i, Quarter::Q2, QuarterField::Rate, 40.0)
            .unwrap()
            .set_quarter_value(&g, &a, &i, Quarter::Q2, QuarterField::Quantity, 5.0)
            .unwrap()
    }

    #[test]
    fn test_summary_shape() {
        let summary = summarize(&create_test_budget());
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json[0]["goal"], "Research");
        assert_eq!(json[0]["activities"][0]["name"], "Seminars");
        assert_eq!(json[0]["activities"][0]["quarterlySpend"]["q2"], 200.0);
        assert_eq!(json[0]["activities"][0]["quarterlySpend"]["q1"], 0.0);
    }

    #[test]
    fn test_prompt_embeds_summary() {
        let prompt = build_prompt(&summarize(&create_test_budget())).unwrap();
        assert!(prompt.contains("\"goal\":\"Research\""));
        assert!(prompt.starts_with("Act as a senior CFO"));
    }

    #[test]
    fn test_empty_budget_skips_provider() {
        let provider = Recording::answering("anything");
        assert_eq!(budget_insights(&Budget::new(), &provider), None);
        assert!(provider.prompts.borrow().is_empty());
    }

    #[test]
    fn test_provider_answer_passed_through() {
        let provider = Recording::answering("## Phasing\nQ2 heavy.");
        let text = budget_insights(&create_test_budget(), &provider).unwrap();
        assert_eq!(text, "## Phasing\nQ2 heavy.");
        assert_eq!(provider.prompts.borrow().len(), 1);
    }

    #[test]
    fn test_fallback_messages() {
        let budget = create_test_budget();
        assert_eq!(
            budget_insights(&budget, &Recording::answering("")).unwrap(),
            NO_INSIGHTS
        );
        assert_eq!(
            budget_insights(&budget, &Recording::answering("  ")).unwrap(),
            "  "
        );
        assert_eq!(
            budget_insights(&budget, &Recording::failing()).unwrap(),
            PROVIDER_UNAVAILABLE
        );
    }
}
