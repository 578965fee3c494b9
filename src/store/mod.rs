use async_trait::async_trait;

use crate::error::AppResult;
use crate::model::message::{NewMessage, StoredMessage};

pub mod postgres;

#[cfg(test)]
pub mod memory;

/// Persistence of ingested Slack messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Messages with at least one attachment whose `author_name` is `author`,
    /// ordered by `ts`. Fails with `AppError::Retrieval`.
    async fn find_by_author(&self, author: &str) -> AppResult<Vec<StoredMessage>>;

    /// Upsert-or-ignore on `ts`. Returns how many rows were actually written.
    async fn insert_messages(&self, messages: &[NewMessage]) -> AppResult<u64>;
}
