use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Free-form content of one named page section (`hero`, `about`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub section_name: String,
    #[schema(value_type = Object)]
    pub content: Value,
}

impl PageContent {
    pub fn new(section_name: impl Into<String>, content: Value) -> Self {
        Self {
            section_name: section_name.into(),
            content,
        }
    }
}
