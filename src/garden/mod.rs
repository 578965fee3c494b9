use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::model::attendance::{Attendance, DailyAttendance};
use crate::model::member::{Member, Members};
use crate::slack::SlackApi;
use crate::store::MessageStore;

pub mod bucketing;
pub mod collector;
pub mod no_show;

/// Attendance book for one gardening challenge.
///
/// Everything is recomputed from stored messages on each call; nothing is
/// cached between requests.
pub struct Garden {
    store: Arc<dyn MessageStore>,
    slack: Arc<dyn SlackApi>,
    members: Members,
    start_date: NaiveDate,
    gardening_days: u32,
    channel_id: String,
    notify_channel: String,
}

impl Garden {
    pub fn new(
        config: &Config,
        members: Members,
        store: Arc<dyn MessageStore>,
        slack: Arc<dyn SlackApi>,
    ) -> Self {
        Self {
            store,
            slack,
            members,
            start_date: config.start_date,
            gardening_days: config.gardening_days,
            channel_id: config.channel_id.clone(),
            notify_channel: config.notify_channel.clone(),
        }
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn member(&self, user: &str) -> AppResult<&Member> {
        self.members
            .get(user)
            .ok_or_else(|| AppError::UnknownMember(user.to_string()))
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn gardening_days(&self) -> u32 {
        self.gardening_days
    }

    /// Full attendance book of one member.
    pub async fn find_attendance_by_user(&self, user: &str) -> AppResult<Attendance> {
        let messages = self.store.find_by_author(user).await?;
        tracing::debug!(user, messages = messages.len(), "Building attendance");

        Ok(bucketing::build_attendance(messages, user, self.start_date))
    }

    /// Every member's full attendance book, in member order.
    pub async fn find_all_attendance(&self) -> AppResult<Vec<(&Member, Attendance)>> {
        let mut all = Vec::with_capacity(self.members.len());
        for member in self.members.iter() {
            let attendance = self.find_attendance_by_user(&member.github).await?;
            all.push((member, attendance));
        }
        Ok(all)
    }

    /// First record of each member on `date`, `None` when absent.
    pub async fn attendance_on(&self, date: NaiveDate) -> AppResult<Vec<DailyAttendance>> {
        let mut result = Vec::with_capacity(self.members.len());
        for member in self.members.iter() {
            let attendance = self.find_attendance_by_user(&member.github).await?;
            let first_ts = attendance
                .get(&date)
                .and_then(|records| records.first())
                .map(|record| record.ts);

            result.push(DailyAttendance {
                user: member.github.clone(),
                first_ts,
            });
        }
        Ok(result)
    }
}
