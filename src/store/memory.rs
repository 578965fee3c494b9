use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::MessageStore;
use crate::error::{AppError, AppResult};
use crate::model::message::{Attachment, NewMessage, StoredMessage};

/// In-process `slack_messages` table keyed by `ts`.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<String, NewMessage>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the database were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn find_by_author(&self, author: &str) -> AppResult<Vec<StoredMessage>> {
        if self.unavailable {
            return Err(AppError::Retrieval(sqlx::Error::PoolTimedOut));
        }

        let rows = self.rows.lock().unwrap();
        let mut found = Vec::new();
        for row in rows.values() {
            let Some(raw) = row.attachments.as_ref() else {
                continue;
            };

            // `attachments @> [{"author_name": author}]`
            let contains_author = raw.as_array().is_some_and(|items| {
                items
                    .iter()
                    .any(|item| item.get("author_name").and_then(Value::as_str) == Some(author))
            });
            if !contains_author {
                continue;
            }

            // A row that matches but does not decode fails the whole read
            let attachments: Vec<Attachment> = serde_json::from_value(raw.clone())
                .map_err(|e| AppError::Retrieval(sqlx::Error::Decode(Box::new(e))))?;
            found.push(StoredMessage {
                ts: row.ts.clone(),
                ts_for_db: row.ts_for_db,
                attachments,
            });
        }

        Ok(found)
    }

    async fn insert_messages(&self, messages: &[NewMessage]) -> AppResult<u64> {
        if self.unavailable {
            return Err(AppError::Storage(sqlx::Error::PoolTimedOut));
        }

        let mut rows = self.rows.lock().unwrap();
        let mut inserted = 0;
        for message in messages {
            if !rows.contains_key(&message.ts) {
                rows.insert(message.ts.clone(), message.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
