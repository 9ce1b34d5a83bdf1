//! Storage Layer - SQLite-backed persistence
//!
//! System of record is one SQLite file with tables:
//! - cards(id, name, set_name, rarity, price_cents, stock)
//! - employees(id, first_name, last_name, city)

pub mod schema;
pub mod sqlite;
mod update;

pub use sqlite::{init_store, DbStats, SeedReport, ShopStore};
