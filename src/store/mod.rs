// src/store/mod.rs

use anyhow::Result;

use crate::process::record::{ReceivingStatRecord, COLUMNS};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// Column definitions following the surrogate key, in [`COLUMNS`] order.
const COLUMN_TYPES: [&str; 21] = [
    "TEXT", "INT", "TEXT", "TEXT", "INT", "INT", "INT", "INT", "INT", "INT", "FLOAT", "INT",
    "FLOAT", "FLOAT", "FLOAT", "FLOAT", "INT", "FLOAT", "INT", "TEXT", "INT",
];

/// Destination for cleaned records.
///
/// `ensure_table` must be idempotent. `insert_records` writes one file's records in
/// order and either stores all of them or none.
#[allow(async_fn_in_trait)]
pub trait RecordSink {
    /// Name of the table records land in.
    fn table(&self) -> &str;

    async fn ensure_table(&mut self) -> Result<()>;

    async fn insert_records(&mut self, records: &[ReceivingStatRecord]) -> Result<u64>;
}

/// `CREATE TABLE IF NOT EXISTS` statement for `table`.
pub fn create_table_sql(table: &str) -> String {
    let cols: Vec<String> = COLUMNS
        .iter()
        .zip(COLUMN_TYPES.iter())
        .map(|(name, ty)| format!("    {} {}", name, ty))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    id SERIAL PRIMARY KEY,\n{}\n)",
        table,
        cols.join(",\n")
    )
}

/// Parameterized single-row `INSERT` for `table` ($1..$21 in [`COLUMNS`] order).
pub fn insert_sql(table: &str) -> String {
    let placeholders: Vec<String> = (1..=COLUMNS.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        COLUMNS.join(", "),
        placeholders.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_sql_lists_every_column() {
        let sql = create_table_sql("receiving_stats");
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS receiving_stats ("));
        assert!(sql.contains("id SERIAL PRIMARY KEY"));
        assert!(sql.contains("yards_per_reception FLOAT"));
        assert!(sql.contains("first_downs INT"));
        assert!(sql.contains("awards TEXT"));
        assert!(sql.contains("season INT"));
        // surrogate key plus 21 data columns
        assert_eq!(sql.matches(",\n").count(), 21);
    }

    #[test]
    fn create_sql_is_safe_to_repeat() {
        let first = create_table_sql("receiving_stats");
        let second = create_table_sql("receiving_stats");
        assert_eq!(first, second);
        assert!(first.contains("IF NOT EXISTS"));
        let upper = first.to_uppercase();
        for destructive in ["DROP", "ALTER", "TRUNCATE", "DELETE"] {
            assert!(!upper.contains(destructive), "{destructive}");
        }
        // one statement only
        assert!(!first.contains(';'));
    }

    #[tokio::test]
    async fn provisioning_twice_keeps_stored_rows() -> Result<()> {
        let mut sink = memory::MemorySink::new("receiving_stats");
        sink.ensure_table().await?;
        let rec = ReceivingStatRecord {
            player: "A".into(),
            ..Default::default()
        };
        sink.insert_records(&[rec.clone()]).await?;
        sink.ensure_table().await?;
        assert_eq!(sink.rows, vec![rec]);
        Ok(())
    }

    #[test]
    fn insert_sql_binds_21_parameters() {
        let sql = insert_sql("receiving_stats");
        assert!(sql.starts_with("INSERT INTO receiving_stats (player, age, team, pos,"));
        assert!(sql.contains("awards, season)"));
        assert!(sql.ends_with("$20, $21)"));
        assert!(!sql.contains("$22"));
    }
}
