use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry returned by the content service.
///
/// The shape is owned by the content service, so the entry is kept as raw JSON
/// and relayed without transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct MenuEntry(pub serde_json::Value);

impl From<serde_json::Value> for MenuEntry {
    fn from(value: serde_json::Value) -> Self {
        MenuEntry(value)
    }
}
