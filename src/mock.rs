use once_cell::sync::Lazy;

use crate::models::{Action, ActionType, PageAnalysis};

// ── Canned analysis ──────────────────────────────────────────────────────────

/// The fixed payload served in mock mode, so development does not burn API
/// quota. Returned for any input; the screenshot is never decoded.
pub static MOCK_ANALYSIS: Lazy<PageAnalysis> = Lazy::new(|| PageAnalysis {
    page_summary: "Wikipedia Homepage".to_string(),
    primary_actions: vec![
        Action {
            label: "Search".to_string(),
            action_type: ActionType::Input,
            icon_name: Some("search".to_string()),
            // Many synonyms so the overlay's DOM lookup gets a hit.
            keywords: [
                "search",
                "search-input",
                "searchInput",
                "go",
                "find",
                "vector-search-box-input",
                "searchform",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        },
        Action {
            label: "Login".to_string(),
            action_type: ActionType::Clickable,
            icon_name: Some("login".to_string()),
            keywords: [
                "log in", "sign in", "user-login", "pt-login", "account", "auth", "user",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        },
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_analysis_has_both_actions() {
        assert_eq!(MOCK_ANALYSIS.page_summary, "Wikipedia Homepage");
        assert_eq!(MOCK_ANALYSIS.primary_actions.len(), 2);
        assert_eq!(MOCK_ANALYSIS.primary_actions[0].action_type, ActionType::Input);
        assert_eq!(
            MOCK_ANALYSIS.primary_actions[1].action_type,
            ActionType::Clickable
        );
    }
}
