use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connects to PostgreSQL with every connection's `search_path` set to the
/// garden schema. `schema` must already be a validated identifier.
pub async fn init_db(database_url: &str, schema: &str) -> Result<PgPool, sqlx::Error> {
    let search_path = format!("SET search_path TO {schema}");

    PgPoolOptions::new()
        .max_connections(5)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                sqlx::query(&search_path).execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
}

/// Creates the schema and the `slack_messages` table when missing.
pub async fn ensure_schema(pool: &PgPool, schema: &str) -> Result<(), sqlx::Error> {
    let statements = [
        format!("CREATE SCHEMA IF NOT EXISTS {schema}"),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {schema}.slack_messages (
                ts          TEXT PRIMARY KEY,
                ts_for_db   TIMESTAMP NOT NULL,
                bot_id      TEXT,
                type        TEXT,
                text        TEXT,
                "user"      TEXT,
                team        TEXT,
                bot_profile JSONB,
                attachments JSONB
            )
            "#
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS slack_messages_attachments_idx \
             ON {schema}.slack_messages USING GIN (attachments jsonb_path_ops)"
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS slack_messages_ts_for_db_idx \
             ON {schema}.slack_messages (ts_for_db)"
        ),
    ];

    for statement in &statements {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!(schema, "Database schema ready");
    Ok(())
}
