use serde::Serialize;
use utoipa::ToSchema;

use super::Garden;
use crate::error::AppResult;
use crate::model::message::NewMessage;
use crate::slack::{HistoryRequest, SlackMessage};
use crate::utils::time::slack_ts_to_kst;

/// Page size asked of `conversations.history`.
pub const HISTORY_PAGE_LIMIT: u32 = 1000;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CollectReport {
    /// Messages returned by Slack for the window.
    #[schema(example = 12)]
    pub fetched: usize,
    /// Rows newly written; already stored messages are not counted.
    #[schema(example = 10)]
    pub inserted: u64,
    /// Messages dropped for a missing or malformed `ts`.
    #[schema(example = 0)]
    pub skipped: usize,
}

/// Row for a Slack message, `None` when its `ts` is unusable.
pub fn to_new_message(message: SlackMessage) -> Option<NewMessage> {
    let ts = message.ts?;
    let ts_for_db = slack_ts_to_kst(&ts)?;

    Some(NewMessage {
        ts,
        ts_for_db,
        bot_id: message.bot_id,
        message_type: message.message_type,
        text: message.text,
        user: message.user,
        team: message.team,
        bot_profile: message.bot_profile.filter(|v| !v.is_null()),
        attachments: message
            .attachments
            .filter(|v| !v.is_null() && v.as_array().is_none_or(|a| !a.is_empty())),
    })
}

impl Garden {
    /// Stores the bot's channel messages posted between `oldest` and `latest`
    /// (unix seconds).
    pub async fn collect_slack_messages(&self, oldest: i64, latest: i64) -> AppResult<CollectReport> {
        let mut report = CollectReport::default();
        let mut rows = Vec::new();
        let mut cursor = None;

        loop {
            let page = self
                .slack
                .conversations_history(HistoryRequest {
                    channel: &self.channel_id,
                    oldest,
                    latest,
                    limit: HISTORY_PAGE_LIMIT,
                    cursor: cursor.take(),
                })
                .await?;

            report.fetched += page.messages.len();
            for message in page.messages {
                match to_new_message(message) {
                    Some(row) => rows.push(row),
                    None => report.skipped += 1,
                }
            }

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        if report.skipped > 0 {
            tracing::warn!(skipped = report.skipped, "Skipped slack messages without a valid ts");
        }

        report.inserted = self.store.insert_messages(&rows).await?;

        tracing::info!(
            oldest,
            latest,
            fetched = report.fetched,
            inserted = report.inserted,
            skipped = report.skipped,
            "Collected slack messages"
        );

        Ok(report)
    }
}
