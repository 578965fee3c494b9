use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;

use super::MessageStore;
use crate::error::{AppError, AppResult};
use crate::model::message::{MessageRow, NewMessage, StoredMessage};

pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn find_by_author(&self, author: &str) -> AppResult<Vec<StoredMessage>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT ts, ts_for_db, attachments
            FROM slack_messages
            WHERE attachments @> $1
            ORDER BY ts
            "#,
        )
        .bind(json!([{ "author_name": author }]))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Retrieval)?;

        Ok(rows.into_iter().map(StoredMessage::from).collect())
    }

    async fn insert_messages(&self, messages: &[NewMessage]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for message in messages {
            let result = sqlx::query(
                r#"
                INSERT INTO slack_messages (
                    ts, ts_for_db, bot_id, type, text, "user", team,
                    bot_profile, attachments
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (ts) DO NOTHING
                "#,
            )
            .bind(&message.ts)
            .bind(message.ts_for_db)
            .bind(&message.bot_id)
            .bind(&message.message_type)
            .bind(&message.text)
            .bind(&message.user)
            .bind(&message.team)
            .bind(&message.bot_profile)
            .bind(&message.attachments)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
