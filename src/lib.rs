pub mod config;
pub mod discover;
pub mod process;
pub mod store;
