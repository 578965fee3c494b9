use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{HistoryPage, HistoryRequest, SlackApi, SlackMessage};
use crate::error::{AppError, AppResult};

const SLACK_API_BASE: &str = "https://slack.com/api";

pub struct SlackClient {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct HistoryResponse {
    ok: bool,
    error: Option<String>,
    #[serde(default)]
    messages: Vec<SlackMessage>,
    #[serde(default)]
    has_more: bool,
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Deserialize)]
struct ResponseMetadata {
    next_cursor: Option<String>,
}

#[derive(Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

impl SlackClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, SLACK_API_BASE.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }
}

fn api_error(method: &str, error: Option<String>) -> AppError {
    AppError::Slack(format!(
        "{method}: {}",
        error.unwrap_or_else(|| "unknown_error".to_string())
    ))
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn conversations_history(&self, request: HistoryRequest<'_>) -> AppResult<HistoryPage> {
        let mut query = vec![
            ("channel", request.channel.to_string()),
            ("oldest", request.oldest.to_string()),
            ("latest", request.latest.to_string()),
            ("limit", request.limit.to_string()),
        ];
        if let Some(cursor) = request.cursor {
            query.push(("cursor", cursor));
        }

        let resp: HistoryResponse = self
            .client
            .get(self.url("conversations.history"))
            .bearer_auth(&self.token)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !resp.ok {
            return Err(api_error("conversations.history", resp.error));
        }

        let has_more = resp.has_more;
        let next_cursor = resp
            .response_metadata
            .and_then(|m| m.next_cursor)
            .filter(|c| has_more && !c.is_empty());

        Ok(HistoryPage {
            messages: resp.messages,
            next_cursor,
        })
    }

    async fn post_message(&self, channel: &str, text: &str) -> AppResult<()> {
        let resp: PostMessageResponse = self
            .client
            .post(self.url("chat.postMessage"))
            .bearer_auth(&self.token)
            .json(&json!({
                "channel": channel,
                "text": text,
                "link_names": true,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !resp.ok {
            return Err(api_error("chat.postMessage", resp.error));
        }

        tracing::info!(channel, "Posted slack message");
        Ok(())
    }
}
