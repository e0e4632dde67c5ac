use std::collections::HashMap;

use crate::process::record::ReceivingStatRecord;
use crate::process::utils::{clean_str, parse_float_or_zero, parse_int_or_zero};

/// One data line keyed by its column header.
pub type RawRow = HashMap<String, String>;

/// Value the source repeats in the `Player` column when it re-emits the header row
/// partway through a table.
pub const REPEATED_HEADER_PLAYER: &str = "Player";

fn field<'a>(row: &'a RawRow, name: &str) -> Option<&'a str> {
    row.get(name).map(String::as_str)
}

/// First non-empty trimmed value among `names`, or an empty string.
fn first_non_empty(row: &RawRow, names: &[&str]) -> String {
    names
        .iter()
        .filter_map(|n| field(row, n))
        .map(clean_str)
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Turn a raw row into a typed record, or `None` when the row must be dropped.
///
/// Rows are dropped when `Player` is absent, empty, or the literal header value.
pub fn normalize_row(row: &RawRow, season: i32) -> Option<ReceivingStatRecord> {
    let player = field(row, "Player")?;
    if player.is_empty() || player == REPEATED_HEADER_PLAYER {
        return None;
    }

    let int = |name: &str| parse_int_or_zero(field(row, name));
    let float = |name: &str| parse_float_or_zero(field(row, name));

    Some(ReceivingStatRecord {
        player: clean_str(player),
        age: int("Age"),
        team: first_non_empty(row, &["Tm", "Team"]).to_uppercase(),
        pos: first_non_empty(row, &["FantPos", "Pos"]),
        games: int("G"),
        games_started: int("GS"),
        targets: int("Tgt"),
        receptions: int("Rec"),
        yards: int("Yds"),
        touchdowns: int("TD"),
        yards_per_reception: float("Y/R"),
        longest: int("Lng"),
        receptions_per_game: float("R/G"),
        yards_per_game: float("Y/G"),
        catch_pct: float("Ctch%"),
        yards_per_target: float("Y/Tgt"),
        first_downs: int("1D"),
        success_pct: float("Succ%"),
        fumbles: int("Fmb"),
        awards: field(row, "Awards").map(clean_str).unwrap_or_default(),
        season,
    })
}
