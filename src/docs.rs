use crate::api::attendance::{
    AllAttendanceResponse, DailyAttendanceResponse, MemberResponse, NoShowResponse,
    RecordResponse, UserAttendanceResponse,
};
use crate::garden::collector::CollectReport;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garden API",
        version = "0.1.0",
        description = r#"
## Gardening attendance book

Members commit every day; the GitHub bot posts each commit to a Slack
channel. This API collects those messages and turns them into a daily
attendance book per member.

- A commit before **04:00 KST** counts for the previous day, unless that
  day already has a commit or is before the start date.
- A **no-show** is a member without a commit on a gardening day.
"#,
    ),
    paths(
        crate::api::attendance::list_members,
        crate::api::attendance::all_attendance,
        crate::api::attendance::user_attendance,
        crate::api::attendance::attendance_on,
        crate::api::attendance::no_shows,

        crate::api::collect::collect,
        crate::api::collect::notify_no_shows
    ),
    components(
        schemas(
            MemberResponse,
            RecordResponse,
            UserAttendanceResponse,
            AllAttendanceResponse,
            DailyAttendanceResponse,
            NoShowResponse,
            CollectReport
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance book APIs"),
        (name = "Collect", description = "Slack collection and notification APIs"),
    )
)]
pub struct ApiDoc;
