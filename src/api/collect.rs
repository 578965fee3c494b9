use actix_web::{HttpResponse, Responder, web};
use chrono::{Duration, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::attendance::NoShowResponse;
use crate::error::AppError;
use crate::garden::Garden;
use crate::garden::collector::CollectReport;
use crate::utils::time::kst_today;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CollectQuery {
    /// Window start, unix seconds. Defaults to 24 hours before `latest`.
    pub oldest: Option<i64>,
    /// Window end, unix seconds. Defaults to now.
    pub latest: Option<i64>,
}

/// Collect slack messages
#[utoipa::path(
    post,
    path = "/collect",
    params(CollectQuery),
    responses(
        (status = 200, description = "Messages stored", body = CollectReport),
        (status = 400, description = "oldest is after latest"),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Slack or storage failure")
    ),
    tag = "Collect"
)]
pub async fn collect(
    garden: web::Data<Garden>,
    query: web::Query<CollectQuery>,
) -> actix_web::Result<impl Responder> {
    let latest = query.latest.unwrap_or_else(|| Utc::now().timestamp());
    let oldest = query
        .oldest
        .unwrap_or_else(|| latest - Duration::days(1).num_seconds());

    if oldest > latest {
        return Err(AppError::InvalidWindow { oldest, latest }.into());
    }

    let report = garden.collect_slack_messages(oldest, latest).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Send today's no-show alarm to slack
#[utoipa::path(
    post,
    path = "/api/no-shows/notify",
    responses(
        (status = 200, description = "Alarm sent", body = NoShowResponse),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Slack or storage failure")
    ),
    tag = "Collect"
)]
pub async fn notify_no_shows(garden: web::Data<Garden>) -> actix_web::Result<impl Responder> {
    let date = kst_today();

    let no_shows = garden
        .send_no_show_message(date)
        .await?
        .into_iter()
        .map(|m| m.github.clone())
        .collect();

    Ok(HttpResponse::Ok().json(NoShowResponse { date, no_shows }))
}
