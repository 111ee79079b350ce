//! JSON payloads of the leaderboard HTTP surface, shared by the server and
//! the terminal client. Field casing follows the original wire format.

use serde::{Deserialize, Serialize};

use crate::leaderboard::Entry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub leaderboard: Vec<Entry>,
    #[serde(rename = "kvAvailable")]
    pub kv_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub message: String,
    pub before: usize,
    pub after: usize,
    pub leaderboard: Vec<Entry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
