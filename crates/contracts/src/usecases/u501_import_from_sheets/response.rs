use serde::{Deserialize, Serialize};

/// Result of a successful connection test
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionInfo {
    #[serde(default)]
    pub message: String,
    /// Data rows below the header row
    #[serde(default)]
    pub row_count: usize,
    #[serde(default)]
    pub headers: Vec<String>,
}

impl ConnectionInfo {
    pub fn summary(&self) -> String {
        format!(
            "Connection successful! Found {} columns and {} rows.",
            self.headers.len(),
            self.row_count
        )
    }
}

/// Ordered header row of the sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadersResponse {
    #[serde(default)]
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub imported_count: Option<usize>,
}
