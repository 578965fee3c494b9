use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;

/// Attachment as posted by the GitHub bot. Only the fields attendance needs
/// are typed; the stored JSON keeps everything Slack sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub author_name: Option<String>,
    pub text: Option<String>,
}

impl Attachment {
    /// The commit text, when this attachment belongs to `user` and has one.
    pub fn text_by(&self, user: &str) -> Option<&str> {
        match (self.author_name.as_deref(), self.text.as_deref()) {
            (Some(author), Some(text)) if author == user && !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Row shape of a `slack_messages` insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub ts: String,
    pub ts_for_db: NaiveDateTime,
    pub bot_id: Option<String>,
    pub message_type: Option<String>,
    pub text: Option<String>,
    pub user: Option<String>,
    pub team: Option<String>,
    pub bot_profile: Option<Value>,
    pub attachments: Option<Value>,
}

#[derive(Debug, FromRow)]
pub struct MessageRow {
    pub ts: String,
    pub ts_for_db: NaiveDateTime,
    pub attachments: Option<Json<Vec<Attachment>>>,
}

/// What the attendance query reads back.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMessage {
    pub ts: String,
    pub ts_for_db: NaiveDateTime,
    pub attachments: Vec<Attachment>,
}

impl From<MessageRow> for StoredMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            ts: row.ts,
            ts_for_db: row.ts_for_db,
            attachments: row.attachments.map(|a| a.0).unwrap_or_default(),
        }
    }
}
