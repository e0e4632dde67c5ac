use anyhow::{Context, Result};
use sqlx::{Connection, PgConnection};
use tracing::{debug, info};

use super::{create_table_sql, insert_sql, RecordSink};
use crate::{config::Config, process::record::ReceivingStatRecord};

/// One PostgreSQL session for the whole run.
///
/// Call [`PgStore::close`] when done, whether or not the run succeeded.
pub struct PgStore {
    conn: PgConnection,
    table: String,
    create_sql: String,
    insert_sql: String,
}

impl PgStore {
    pub async fn connect(config: &Config) -> Result<Self> {
        let options = config.connect_options()?;
        info!(host = options.get_host(), "connecting to PostgreSQL");
        let conn = PgConnection::connect_with(&options)
            .await
            .with_context(|| format!("connecting to PostgreSQL at {}", options.get_host()))?;
        info!(host = options.get_host(), "connected to PostgreSQL");

        Ok(Self {
            conn,
            table: config.table.clone(),
            create_sql: create_table_sql(&config.table),
            insert_sql: insert_sql(&config.table),
        })
    }

    /// Gracefully terminate the session.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .context("closing PostgreSQL connection")
    }
}

impl RecordSink for PgStore {
    fn table(&self) -> &str {
        &self.table
    }

    async fn ensure_table(&mut self) -> Result<()> {
        sqlx::query(&self.create_sql)
            .execute(&mut self.conn)
            .await
            .with_context(|| format!("creating table {}", self.table))?;
        debug!(table = %self.table, "table ready");
        Ok(())
    }

    async fn insert_records(&mut self, records: &[ReceivingStatRecord]) -> Result<u64> {
        let mut tx = self
            .conn
            .begin()
            .await
            .context("beginning insert transaction")?;

        let mut affected = 0;
        for (i, r) in records.iter().enumerate() {
            let res = sqlx::query(&self.insert_sql)
                .bind(&r.player)
                .bind(r.age)
                .bind(&r.team)
                .bind(&r.pos)
                .bind(r.games)
                .bind(r.games_started)
                .bind(r.targets)
                .bind(r.receptions)
                .bind(r.yards)
                .bind(r.touchdowns)
                .bind(r.yards_per_reception)
                .bind(r.longest)
                .bind(r.receptions_per_game)
                .bind(r.yards_per_game)
                .bind(r.catch_pct)
                .bind(r.yards_per_target)
                .bind(r.first_downs)
                .bind(r.success_pct)
                .bind(r.fumbles)
                .bind(&r.awards)
                .bind(r.season)
                .execute(&mut *tx)
                .await
                .with_context(|| {
                    format!("inserting record {} ({}) into {}", i + 1, r.player, self.table)
                })?;
            affected += res.rows_affected();
        }

        tx.commit().await.context("committing insert transaction")?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DATA_DIR;

    // Needs a disposable database: DATABASE_URL=postgres://... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn provisioning_is_idempotent_and_inserts_commit() -> Result<()> {
        let url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
        let cfg = Config::new(DEFAULT_DATA_DIR, "receiving_stats_it", Some(url))?;
        let mut store = PgStore::connect(&cfg).await?;

        sqlx::query("DROP TABLE IF EXISTS receiving_stats_it")
            .execute(&mut store.conn)
            .await?;
        store.ensure_table().await?;
        store.ensure_table().await?;

        let rec = ReceivingStatRecord {
            player: "Justin Jefferson".into(),
            team: "MIN".into(),
            games: 17,
            receptions: 68,
            yards: 1074,
            touchdowns: 5,
            season: 2023,
            ..Default::default()
        };
        assert_eq!(store.insert_records(&[rec.clone(), rec]).await?, 2);

        let (count, yards): (i64, Option<i64>) =
            sqlx::query_as("SELECT COUNT(*), SUM(yards)::BIGINT FROM receiving_stats_it")
                .fetch_one(&mut store.conn)
                .await?;
        assert_eq!(count, 2);
        assert_eq!(yards, Some(2148));

        sqlx::query("DROP TABLE receiving_stats_it")
            .execute(&mut store.conn)
            .await?;
        store.close().await
    }
}
