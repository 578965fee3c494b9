//! In-memory stand-ins for Slack and fixtures shared by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::model::member::{Member, Members};
use crate::model::message::NewMessage;
use crate::slack::{HistoryPage, HistoryRequest, SlackApi, SlackMessage};
use crate::utils::time::slack_ts_to_kst;

/// (channel, oldest, latest, cursor)
pub type RecordedHistoryRequest = (String, i64, i64, Option<String>);

#[derive(Default)]
pub struct FakeSlack {
    pages: Mutex<VecDeque<HistoryPage>>,
    history_requests: Mutex<Vec<RecordedHistoryRequest>>,
    posted: Mutex<Vec<(String, String)>>,
    failing: bool,
}

impl FakeSlack {
    pub fn with_pages(pages: Vec<HistoryPage>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    /// Every call answers `ok: false`.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn history_requests(&self) -> Vec<RecordedHistoryRequest> {
        self.history_requests.lock().unwrap().clone()
    }

    pub fn posted(&self) -> Vec<(String, String)> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SlackApi for FakeSlack {
    async fn conversations_history(&self, request: HistoryRequest<'_>) -> AppResult<HistoryPage> {
        if self.failing {
            return Err(AppError::Slack("conversations.history: not_in_channel".to_string()));
        }

        self.history_requests.lock().unwrap().push((
            request.channel.to_string(),
            request.oldest,
            request.latest,
            request.cursor,
        ));
        Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn post_message(&self, channel: &str, text: &str) -> AppResult<()> {
        if self.failing {
            return Err(AppError::Slack("chat.postMessage: channel_not_found".to_string()));
        }

        self.posted
            .lock()
            .unwrap()
            .push((channel.to_string(), text.to_string()));
        Ok(())
    }
}

pub fn members() -> Members {
    Members::new(vec![
        Member {
            github: "junho85".to_string(),
            slack: "junho85.slack".to_string(),
        },
        Member {
            github: "kim".to_string(),
            slack: "kim".to_string(),
        },
    ])
}

/// A GitHub bot notification as Slack returns it.
pub fn slack_commit(ts: &str, author: &str, text: &str) -> SlackMessage {
    SlackMessage {
        ts: Some(ts.to_string()),
        bot_id: Some("B0GITHUB".to_string()),
        message_type: Some("message".to_string()),
        text: Some(String::new()),
        attachments: Some(json!([{ "author_name": author, "text": text }])),
        ..SlackMessage::default()
    }
}

/// The stored row for [`slack_commit`].
pub fn commit_message(ts: &str, author: &str, text: &str) -> NewMessage {
    NewMessage {
        ts: ts.to_string(),
        ts_for_db: slack_ts_to_kst(ts).expect("valid slack ts"),
        bot_id: Some("B0GITHUB".to_string()),
        message_type: Some("message".to_string()),
        text: None,
        user: None,
        team: None,
        bot_profile: None,
        attachments: Some(json!([{ "author_name": author, "text": text }])),
    }
}
