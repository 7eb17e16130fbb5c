use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A single inventory record as stored on disk and returned by the API.
///
/// `quantity` keeps whatever JSON number the client sent, integer or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub quantity: Number,
}

// Request bodies. Fields are optional so that missing values can be reported
// with our own error message instead of a deserializer rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub quantity: Option<Number>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub quantity: Option<Number>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalQuantity {
    pub total_quantity: Number,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
