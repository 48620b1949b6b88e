//! Keyword-overlap relevance scoring for tool selection.
//!
//! A tool earns 1.0 for every category in which both the query and the
//! tool's name/description mention a keyword (not necessarily the same one).
//! When no category matches, each query token found verbatim inside the tool
//! text adds 0.1.

use super::traits::ToolSelector;
use crate::types::ToolDescriptor;
use anyhow::Result;
use async_trait::async_trait;

/// Keyword categories, in scoring order.
const KEYWORD_CATEGORIES: &[(&str, &[&str])] = &[
    ("order", &["order", "shipping", "delivery", "status"]),
    (
        "product",
        &[
            "monitor",
            "printer",
            "keyboard",
            "speakers",
            "spec",
            "specification",
            "compatibility",
        ],
    ),
    ("warranty", &["warranty", "guarantee"]),
    ("ticket", &["issue", "problem", "ticket", "support"]),
];

const CATEGORY_WEIGHT: f64 = 1.0;
const TOKEN_WEIGHT: f64 = 0.1;

/// Score how well `tool` fits `query`. Pure and always non-negative.
pub fn score_tool(tool: &ToolDescriptor, query: &str) -> f64 {
    let text = format!("{} {}", tool.name, tool.description).to_lowercase();
    let query = query.to_lowercase();

    let mut score = 0.0;
    for (_, keywords) in KEYWORD_CATEGORIES {
        let in_query = keywords.iter().any(|k| query.contains(k));
        let in_tool = keywords.iter().any(|k| text.contains(k));
        if in_query && in_tool {
            score += CATEGORY_WEIGHT;
        }
    }

    if score == 0.0 {
        for word in query.split_whitespace() {
            if text.contains(word) {
                score += TOKEN_WEIGHT;
            }
        }
    }

    score
}

/// Heuristic selector: highest `score_tool`, first one wins on ties, and
/// nothing is selected unless the best score is positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSelector;

impl KeywordSelector {
    pub fn best_match(query: &str, tools: &[ToolDescriptor]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        let mut best_score = 0.0;

        for (idx, tool) in tools.iter().enumerate() {
            let s = score_tool(tool, query);
            if s > best_score {
                best_score = s;
                best = Some((idx, s));
            }
        }

        best
    }
}

#[async_trait]
impl ToolSelector for KeywordSelector {
    async fn select(&self, query: &str, tools: &[ToolDescriptor]) -> Result<Option<usize>> {
        Ok(Self::best_match(query, tools).map(|(idx, _)| idx))
    }
}
