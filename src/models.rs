use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SimplifyRequest {
    pub image_data: String,
}

/// Whether an action is a text box to type into or an element to click.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Input,
    Clickable,
}

/// One UI element of interest surfaced to the overlay, with enough
/// keyword synonyms for the client to locate it in the DOM.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Action {
    pub label: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PageAnalysis {
    pub page_summary: String,
    pub primary_actions: Vec<Action>,
}

/// Response envelope. Logical failures ride in the body with HTTP 200;
/// the `status` field is the only success/error discriminator.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SimplifyResponse {
    Success { data: PageAnalysis },
    Error { message: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_key_present: bool,
}
