use anyhow::{Context, Result};
use csv::{ByteRecord, ReaderBuilder};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, trace};

use crate::process::{
    normalize::{normalize_row, RawRow},
    record::ReceivingStatRecord,
    utils::extract_season_from_filename,
};

/// Lines ahead of the header row that are discarded unread.
pub const BANNER_LINES: usize = 1;

/// Records accepted from one file, in file order.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub records: Vec<ReceivingStatRecord>,
    /// Data lines dropped by the player check.
    pub rejected: usize,
}

fn to_raw_row(headers: &ByteRecord, record: &ByteRecord) -> RawRow {
    // later duplicate headers overwrite earlier ones; bad bytes become U+FFFD
    headers
        .iter()
        .zip(record.iter())
        .map(|(h, v)| {
            (
                String::from_utf8_lossy(h).into_owned(),
                String::from_utf8_lossy(v).into_owned(),
            )
        })
        .collect()
}

/// Parse a whole season table from `reader`.
///
/// The first line is a banner and is skipped, the second is the header row, every line
/// after that is data. Rows may be shorter or longer than the header. Text that is not
/// valid UTF-8 is decoded lossily rather than rejected.
pub fn parse_receiving_csv<R: BufRead>(mut reader: R, season: i32) -> Result<ParsedFile> {
    for _ in 0..BANNER_LINES {
        let mut banner = Vec::new();
        let n = reader
            .read_until(b'\n', &mut banner)
            .context("reading banner line")?;
        if n == 0 {
            return Ok(ParsedFile::default());
        }
        trace!(banner = %String::from_utf8_lossy(&banner).trim_end(), "skipped banner");
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .byte_headers()
        .with_context(|| format!("reading header row (line {})", BANNER_LINES + 1))?
        .clone();
    debug!(columns = headers.len(), "header row");

    let mut parsed = ParsedFile::default();
    let mut record = ByteRecord::new();
    let mut row = 0;
    loop {
        // the csv reader never sees the banner, so its line numbers are shifted
        let line = rdr.position().line() + BANNER_LINES as u64;
        let more = rdr
            .read_byte_record(&mut record)
            .with_context(|| format!("reading data row {} (near line {})", row + 1, line))?;
        if !more {
            break;
        }
        row += 1;
        match normalize_row(&to_raw_row(&headers, &record), season) {
            Some(rec) => parsed.records.push(rec),
            None => parsed.rejected += 1,
        }
    }

    Ok(parsed)
}

/// Open `path` and parse it, tagging every record with the season in its file name.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn load_receiving_csv(path: &Path) -> Result<ParsedFile> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let season = extract_season_from_filename(&file_name);

    let file = File::open(path).with_context(|| format!("Failed to open CSV file: {:?}", path))?;
    let parsed = parse_receiving_csv(BufReader::new(file), season)
        .with_context(|| format!("Failed to parse CSV file: {:?}", path))?;

    debug!(
        season,
        accepted = parsed.records.len(),
        rejected = parsed.rejected,
        "parsed"
    );
    Ok(parsed)
}
