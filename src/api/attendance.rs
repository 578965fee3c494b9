use std::collections::BTreeMap;

use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::garden::Garden;
use crate::model::attendance::{Attendance, AttendanceRecord};
use crate::utils::slack_markup::slack_to_markdown;
use crate::utils::time::parse_date;

#[derive(Serialize, ToSchema)]
pub struct MemberResponse {
    #[schema(example = "junho85")]
    pub github: String,
    #[schema(example = "junho85")]
    pub slack: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecordResponse {
    #[schema(example = "2024-05-02T02:30:00", value_type = String, format = "date-time")]
    pub ts: NaiveDateTime,
    /// Commit texts with Slack markup converted to Markdown
    #[schema(example = json!(["[`abc123`](https://github.com/junho85/garden5/commit/abc123) - fix"]))]
    pub messages: Vec<String>,
}

impl From<&AttendanceRecord> for RecordResponse {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            ts: record.ts,
            messages: record.message.iter().map(|m| slack_to_markdown(m)).collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct UserAttendanceResponse {
    #[schema(example = "junho85")]
    pub user: String,
    /// Gardening day (`YYYY-MM-DD`) -> records, in ascending order
    #[schema(value_type = Object)]
    pub attendance: BTreeMap<String, Vec<RecordResponse>>,
}

impl UserAttendanceResponse {
    fn new(user: &str, attendance: &Attendance) -> Self {
        Self {
            user: user.to_string(),
            attendance: attendance
                .iter()
                .map(|(date, records)| {
                    (
                        date.format("%Y-%m-%d").to_string(),
                        records.iter().map(RecordResponse::from).collect(),
                    )
                })
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AllAttendanceResponse {
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = 100)]
    pub gardening_days: u32,
    pub users: Vec<UserAttendanceResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct DailyAttendanceResponse {
    #[schema(example = "junho85")]
    pub user: String,
    #[schema(example = "2024-05-02T02:30:00", value_type = Option<String>, format = "date-time")]
    pub first_ts: Option<NaiveDateTime>,
}

#[derive(Serialize, ToSchema)]
pub struct NoShowResponse {
    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = json!(["kim"]))]
    pub no_shows: Vec<String>,
}

fn date_param(raw: &str) -> Result<NaiveDate, AppError> {
    parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}

/// Gardeners list
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Configured members", body = [MemberResponse])
    ),
    tag = "Attendance"
)]
pub async fn list_members(garden: web::Data<Garden>) -> impl Responder {
    let members: Vec<MemberResponse> = garden
        .members()
        .iter()
        .map(|m| MemberResponse {
            github: m.github.clone(),
            slack: m.slack.clone(),
        })
        .collect();

    HttpResponse::Ok().json(members)
}

/// Attendance book of every member
#[utoipa::path(
    get,
    path = "/api/gets",
    responses(
        (status = 200, description = "Attendance per member", body = AllAttendanceResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn all_attendance(garden: web::Data<Garden>) -> actix_web::Result<impl Responder> {
    let users = garden
        .find_all_attendance()
        .await?
        .iter()
        .map(|(member, attendance)| UserAttendanceResponse::new(&member.github, attendance))
        .collect();

    Ok(HttpResponse::Ok().json(AllAttendanceResponse {
        start_date: garden.start_date(),
        gardening_days: garden.gardening_days(),
        users,
    }))
}

/// Attendance book of one member
#[utoipa::path(
    get,
    path = "/api/users/{user}",
    params(
        ("user", description = "GitHub user id")
    ),
    responses(
        (status = 200, description = "Member attendance", body = UserAttendanceResponse),
        (status = 404, description = "Unknown member", body = Object, example = json!({
            "message": "unknown member: nobody"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn user_attendance(
    garden: web::Data<Garden>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let user = path.into_inner();
    let member = garden.member(&user)?;

    let attendance = garden.find_attendance_by_user(&member.github).await?;

    Ok(HttpResponse::Ok().json(UserAttendanceResponse::new(&member.github, &attendance)))
}

/// First commit of every member on a gardening day
#[utoipa::path(
    get,
    path = "/get/{date}",
    params(
        ("date", description = "Gardening day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Attendance for the day", body = [DailyAttendanceResponse]),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn attendance_on(
    garden: web::Data<Garden>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let date = date_param(&path)?;

    let result: Vec<DailyAttendanceResponse> = garden
        .attendance_on(date)
        .await?
        .into_iter()
        .map(|d| DailyAttendanceResponse {
            user: d.user,
            first_ts: d.first_ts,
        })
        .collect();

    Ok(HttpResponse::Ok().json(result))
}

/// Members without a commit on a gardening day
#[utoipa::path(
    get,
    path = "/api/no-shows/{date}",
    params(
        ("date", description = "Gardening day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "No-show members", body = NoShowResponse),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn no_shows(
    garden: web::Data<Garden>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let date = date_param(&path)?;

    let no_shows = garden
        .compute_no_shows(date)
        .await?
        .into_iter()
        .map(|m| m.github.clone())
        .collect();

    Ok(HttpResponse::Ok().json(NoShowResponse { date, no_shows }))
}
