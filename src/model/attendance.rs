use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One qualifying message for a member: when it was posted (KST wall clock)
/// and the commit texts the member authored in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub ts: NaiveDateTime,
    pub message: Vec<String>,
}

/// Gardening day -> records, ascending by timestamp within each day.
pub type Attendance = BTreeMap<NaiveDate, Vec<AttendanceRecord>>;

/// A member's first record on a given gardening day, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAttendance {
    pub user: String,
    pub first_ts: Option<NaiveDateTime>,
}
