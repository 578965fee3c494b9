use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod garden;
mod model;
mod routes;
mod slack;
mod store;
mod utils;

#[cfg(test)]
mod testing;

use config::Config;
use db::{ensure_schema, init_db};
use garden::Garden;
use model::member::Members;
use slack::client::SlackClient;
use store::postgres::PgMessageStore;

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "garden.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let members = Members::load(&config.members_file)?;
    info!(members = members.len(), start_date = %config.start_date, "Members loaded");

    let pool = init_db(&config.database_url, &config.db_schema)
        .await
        .context("failed to connect to database")?;
    ensure_schema(&pool, &config.db_schema)
        .await
        .context("failed to prepare database schema")?;

    let garden = Data::new(Garden::new(
        &config,
        members,
        Arc::new(PgMessageStore::new(pool)),
        Arc::new(SlackClient::new(config.slack_api_token.clone())),
    ));
    let slack_limiter = routes::build_limiter(config.rate_collect_per_min);
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(garden.clone())
            .configure(|cfg| routes::configure(cfg, slack_limiter.clone()))
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
