use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Attendance is kept in Korea Standard Time (UTC+9, no DST).
pub const KST_OFFSET_SECS: i32 = 9 * 3600;

pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("UTC+9 is within the offset range")
}

/// Parses a Slack message id such as `"1714584600.000200"` into a UTC
/// instant. Returns `None` for anything that is not `<secs>[.<fraction>]`.
pub fn parse_slack_ts(ts: &str) -> Option<DateTime<Utc>> {
    let (secs, frac) = match ts.trim().split_once('.') {
        Some((secs, frac)) => (secs, frac),
        None => (ts.trim(), ""),
    };

    if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let secs: i64 = secs.parse().ok()?;
    let nanos: u32 = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<9}").parse().ok()?
    };

    DateTime::from_timestamp(secs, nanos)
}

/// KST wall-clock time of a Slack message, as stored in `ts_for_db`.
/// `None` also when the shifted time no longer fits a `NaiveDateTime`.
pub fn slack_ts_to_kst(ts: &str) -> Option<NaiveDateTime> {
    parse_slack_ts(ts)?
        .naive_utc()
        .checked_add_signed(Duration::seconds(i64::from(KST_OFFSET_SECS)))
}

pub fn kst_today() -> NaiveDate {
    Utc::now().with_timezone(&kst()).date_naive()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
