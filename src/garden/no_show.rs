use chrono::NaiveDate;

use super::Garden;
use crate::error::AppResult;
use crate::model::member::Member;

pub const NO_SHOW_HEADER: &str = "[미출석자 알람]\n";

/// Slack text mentioning every no-show member.
pub fn no_show_message<'a>(no_shows: impl IntoIterator<Item = &'a Member>) -> String {
    let mut message = String::from(NO_SHOW_HEADER);
    for member in no_shows {
        message.push('@');
        message.push_str(&member.slack);
        message.push(' ');
    }
    message
}

impl Garden {
    /// Members without a single record on the gardening day `date`.
    pub async fn compute_no_shows(&self, date: NaiveDate) -> AppResult<Vec<&Member>> {
        let mut no_shows = Vec::new();
        for member in self.members.iter() {
            let attendance = self.find_attendance_by_user(&member.github).await?;
            let attended = attendance.get(&date).is_some_and(|records| !records.is_empty());
            if !attended {
                no_shows.push(member);
            }
        }
        Ok(no_shows)
    }

    /// Posts the no-show alarm for `date` to the notify channel and returns
    /// who was mentioned.
    pub async fn send_no_show_message(&self, date: NaiveDate) -> AppResult<Vec<&Member>> {
        let no_shows = self.compute_no_shows(date).await?;
        let message = no_show_message(no_shows.iter().copied());

        self.slack.post_message(&self.notify_channel, &message).await?;
        tracing::info!(%date, no_shows = no_shows.len(), "Sent no-show message");

        Ok(no_shows)
    }
}
