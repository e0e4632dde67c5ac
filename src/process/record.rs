/// One cleaned row of a season receiving table.
///
/// Every field is populated; numeric columns that were blank or unparsable hold zero
/// and text columns hold an empty string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReceivingStatRecord {
    pub player: String,
    pub age: i32,
    pub team: String,
    pub pos: String,
    pub games: i32,
    pub games_started: i32,
    pub targets: i32,
    pub receptions: i32,
    pub yards: i32,
    pub touchdowns: i32,
    pub yards_per_reception: f64,
    pub longest: i32,
    pub receptions_per_game: f64,
    pub yards_per_game: f64,
    pub catch_pct: f64,
    pub yards_per_target: f64,
    pub first_downs: i32,
    pub success_pct: f64,
    pub fumbles: i32,
    pub awards: String,
    pub season: i32,
}

/// Storage column names, in insert order.
pub const COLUMNS: [&str; 21] = [
    "player",
    "age",
    "team",
    "pos",
    "games",
    "games_started",
    "targets",
    "receptions",
    "yards",
    "touchdowns",
    "yards_per_reception",
    "longest",
    "receptions_per_game",
    "yards_per_game",
    "catch_pct",
    "yards_per_target",
    "first_downs",
    "success_pct",
    "fumbles",
    "awards",
    "season",
];
