use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppResult;

pub mod client;

/// A message from `conversations.history`. Every field is optional on the
/// wire; ingestion decides what is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlackMessage {
    pub ts: Option<String>,
    pub bot_id: Option<String>,
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    pub text: Option<String>,
    pub user: Option<String>,
    pub team: Option<String>,
    pub bot_profile: Option<Value>,
    pub attachments: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct HistoryRequest<'a> {
    pub channel: &'a str,
    pub oldest: i64,
    pub latest: i64,
    pub limit: u32,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryPage {
    pub messages: Vec<SlackMessage>,
    /// Set while Slack reports `has_more`.
    pub next_cursor: Option<String>,
}

/// The two Slack Web API calls the garden relies on.
#[async_trait]
pub trait SlackApi: Send + Sync {
    async fn conversations_history(&self, request: HistoryRequest<'_>) -> AppResult<HistoryPage>;

    /// `chat.postMessage` with `link_names` so `@name` mentions notify.
    async fn post_message(&self, channel: &str, text: &str) -> AppResult<()>;
}
