use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::model::attendance::{Attendance, AttendanceRecord};
use crate::model::message::StoredMessage;

/// Commits before this hour (KST) may still count for the previous day.
pub const ROLLOVER_HOUR: u32 = 4;

/// Gardening day for a record at `ts`, given what has been bucketed so far.
///
/// A record before 04:00 belongs to the previous day when that day is not
/// before `start_date` and has no record yet; otherwise to its own date.
pub fn gardening_day(ts: NaiveDateTime, start_date: NaiveDate, attendance: &Attendance) -> NaiveDate {
    let date = ts.date();
    match date.pred_opt() {
        Some(prev)
            if ts.hour() < ROLLOVER_HOUR
                && prev >= start_date
                && !attendance.contains_key(&prev) =>
        {
            prev
        }
        _ => date,
    }
}

/// Buckets `user`'s commits into gardening days.
///
/// Messages are replayed in timestamp order regardless of the order they were
/// fetched in, so the rollover decision never depends on storage ordering.
pub fn build_attendance(
    mut messages: Vec<StoredMessage>,
    user: &str,
    start_date: NaiveDate,
) -> Attendance {
    messages.sort_by(|a, b| a.ts_for_db.cmp(&b.ts_for_db).then_with(|| a.ts.cmp(&b.ts)));

    let mut attendance = Attendance::new();
    for message in messages {
        let commits: Vec<String> = message
            .attachments
            .iter()
            .filter_map(|a| a.text_by(user))
            .map(str::to_owned)
            .collect();

        // skip - no commits by this user
        if commits.is_empty() {
            continue;
        }

        let day = gardening_day(message.ts_for_db, start_date, &attendance);
        attendance.entry(day).or_default().push(AttendanceRecord {
            ts: message.ts_for_db,
            message: commits,
        });
    }

    attendance
}
