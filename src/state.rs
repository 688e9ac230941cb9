//! Persisted application state.
//!
//! The shell never inspects the shape of what the app asks it to save. State
//! is carried as raw JSON and must round-trip losslessly through
//! serialize → store → load → deserialize, since whatever comes back out is
//! handed to the next instance as its initial flags.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque, app-defined state blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedState(pub Value);

impl PersistedState {
    /// Parse stored text back into state. Malformed text is an error, never
    /// an empty state.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize for storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}

impl From<Value> for PersistedState {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
