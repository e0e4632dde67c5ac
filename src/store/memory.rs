use anyhow::{bail, Result};

use super::RecordSink;
use crate::process::record::ReceivingStatRecord;

/// In-process sink with the same all-or-nothing insert contract as [`super::PgStore`].
#[derive(Debug, Default)]
pub struct MemorySink {
    pub table: String,
    pub created: bool,
    pub ensure_calls: usize,
    pub rows: Vec<ReceivingStatRecord>,
    /// Fail the insert of the record at this position within a batch.
    pub fail_at: Option<usize>,
}

impl MemorySink {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Default::default()
        }
    }
}

impl RecordSink for MemorySink {
    fn table(&self) -> &str {
        &self.table
    }

    async fn ensure_table(&mut self) -> Result<()> {
        self.ensure_calls += 1;
        self.created = true;
        Ok(())
    }

    async fn insert_records(&mut self, records: &[ReceivingStatRecord]) -> Result<u64> {
        if !self.created {
            bail!("relation \"{}\" does not exist", self.table);
        }
        let mut staged = Vec::with_capacity(records.len());
        for (i, r) in records.iter().enumerate() {
            if self.fail_at == Some(i) {
                bail!("inserting record {} ({}) into {}", i + 1, r.player, self.table);
            }
            staged.push(r.clone());
        }
        self.rows.extend(staged);
        Ok(records.len() as u64)
    }
}
