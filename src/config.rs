// src/config.rs

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::postgres::PgConnectOptions;
use std::{env, path::PathBuf, str::FromStr};

/// Directory scanned for season CSVs when `RECEIVING_DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = "./data/receiving";

/// Destination table when `RECEIVING_TABLE` is unset.
pub const DEFAULT_TABLE: &str = "receiving_stats";

static TABLE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("table name regex"));

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub table: String,
    /// `DATABASE_URL`, if present. Otherwise the `PG*` variables are used.
    pub database_url: Option<String>,
}

impl Config {
    /// Load `.env` (if any) and read the run configuration from the environment.
    pub fn from_env() -> Result<Self> {
        // a missing .env is fine; the variables may already be exported
        dotenvy::dotenv().ok();

        let data_dir = env::var("RECEIVING_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        let table = env::var("RECEIVING_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string());
        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());

        Self::new(data_dir, table, database_url)
    }

    pub fn new(
        data_dir: impl Into<PathBuf>,
        table: impl Into<String>,
        database_url: Option<String>,
    ) -> Result<Self> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self {
            data_dir: data_dir.into(),
            table,
            database_url,
        })
    }

    /// Connection options for the storage session.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        match &self.database_url {
            Some(url) => PgConnectOptions::from_str(url).context("parsing DATABASE_URL"),
            // reads PGHOST, PGPORT, PGUSER, PGPASSWORD, PGDATABASE, ...
            None => Ok(PgConnectOptions::new()),
        }
    }
}

/// The table name is spliced into DDL/DML, so only plain identifiers are accepted.
pub fn validate_table_name(name: &str) -> Result<()> {
    if !TABLE_NAME_RE.is_match(name) {
        bail!("invalid table name {:?}: expected [A-Za-z_][A-Za-z0-9_]*", name);
    }
    Ok(())
}
