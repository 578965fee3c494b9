use std::env;
use std::str::FromStr;

use chrono::NaiveDate;
use dotenvy::dotenv;

use crate::error::{AppError, AppResult};

/// One request per millisecond is the finest quota the limiter can express.
pub const MAX_RATE_PER_MIN: u32 = 60_000;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_schema: String,

    // Slack
    pub slack_api_token: String,
    pub channel_id: String,
    pub notify_channel: String,

    // Gardening challenge
    pub start_date: NaiveDate,
    pub gardening_days: u32,
    pub members_file: String,

    pub rate_collect_per_min: u32,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} must be set")))
        };
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let start_date = required("START_DATE")?;
        let start_date = NaiveDate::parse_from_str(start_date.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::Config(format!("START_DATE must be YYYY-MM-DD, got {start_date:?}"))
        })?;

        let db_schema = or_default("DB_SCHEMA", "garden5");
        if db_schema.is_empty()
            || !db_schema
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(AppError::Config(format!(
                "DB_SCHEMA must be a plain identifier, got {db_schema:?}"
            )));
        }

        let rate_collect_per_min: u32 = parse_or(&lookup, "RATE_COLLECT_PER_MIN", 6)?;
        if !(1..=MAX_RATE_PER_MIN).contains(&rate_collect_per_min) {
            return Err(AppError::Config(format!(
                "RATE_COLLECT_PER_MIN must be between 1 and {MAX_RATE_PER_MIN}, got {rate_collect_per_min}"
            )));
        }

        Ok(Self {
            server_addr: or_default("SERVER_ADDR", "127.0.0.1:8000"),
            database_url: required("DATABASE_URL")?,
            db_schema,

            slack_api_token: required("SLACK_API_TOKEN")?,
            channel_id: required("CHANNEL_ID")?,
            notify_channel: or_default("NOTIFY_CHANNEL", "#gardening-for-100days"),

            start_date,
            gardening_days: parse_or(&lookup, "GARDENING_DAYS", 100)?,
            members_file: or_default("MEMBERS_FILE", "users.yaml"),

            rate_collect_per_min,
            log_dir: or_default("LOG_DIR", "logs"),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} is not a valid number: {raw:?}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) fn vars() -> HashMap<&'static str, String> {
        HashMap::from([
            ("DATABASE_URL", "postgres://localhost/garden".to_string()),
            ("SLACK_API_TOKEN", "xoxb-test".to_string()),
            ("CHANNEL_ID", "C0123".to_string()),
            ("START_DATE", "2024-01-01".to_string()),
        ])
    }

    pub(crate) fn test_config() -> Config {
        let vars = vars();
        Config::from_lookup(|k| vars.get(k).cloned()).expect("test config")
    }

    #[test]
    fn defaults_fill_optional_values() {
        let config = test_config();

        assert_eq!(config.db_schema, "garden5");
        assert_eq!(config.gardening_days, 100);
        assert_eq!(config.notify_channel, "#gardening-for-100days");
        assert_eq!(config.members_file, "users.yaml");
        assert_eq!(
            config.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn missing_token_is_rejected() {
        let mut vars = vars();
        vars.remove("SLACK_API_TOKEN");

        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("SLACK_API_TOKEN"));
    }

    #[test]
    fn malformed_start_date_is_rejected() {
        let mut vars = vars();
        vars.insert("START_DATE", "03/02/2020".to_string());

        assert!(matches!(
            Config::from_lookup(|k| vars.get(k).cloned()),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn schema_must_be_an_identifier() {
        let mut vars = vars();
        vars.insert("DB_SCHEMA", "garden5; DROP TABLE x".to_string());

        assert!(Config::from_lookup(|k| vars.get(k).cloned()).is_err());
    }

    #[test]
    fn collect_rate_must_fit_the_limiter() {
        let mut vars = vars();
        for bad in ["0", "60001"] {
            vars.insert("RATE_COLLECT_PER_MIN", bad.to_string());
            assert!(
                matches!(
                    Config::from_lookup(|k| vars.get(k).cloned()),
                    Err(AppError::Config(_))
                ),
                "{bad}"
            );
        }

        vars.insert("RATE_COLLECT_PER_MIN", "60000".to_string());
        assert!(Config::from_lookup(|k| vars.get(k).cloned()).is_ok());
    }

    #[test]
    fn numbers_are_parsed() {
        let mut vars = vars();
        vars.insert("GARDENING_DAYS", "66".to_string());
        vars.insert("RATE_COLLECT_PER_MIN", "abc".to_string());

        assert!(Config::from_lookup(|k| vars.get(k).cloned()).is_err());

        vars.insert("RATE_COLLECT_PER_MIN", "2".to_string());
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.gardening_days, 66);
        assert_eq!(config.rate_collect_per_min, 2);
    }
}
