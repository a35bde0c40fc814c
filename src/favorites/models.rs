//! Wire models for the favorites endpoints.

use serde::{Deserialize, Serialize};

/// Acknowledgement returned by create and delete.
///
/// `ok` defaults to `false` so an empty or unexpected object reads as a
/// refusal rather than a success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteAck {
    #[serde(default)]
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Identifier the server stored the favorite under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

impl FavoriteAck {
    /// The server's explanation, or a generic one naming the status code.
    #[must_use]
    pub fn reason(&self, status: u16) -> String {
        self.error
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"))
    }
}
