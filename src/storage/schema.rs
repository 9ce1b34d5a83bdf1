//! Database schema definitions

/// Connection-level pragmas applied on every open
pub const PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// SQL to create the cards table
pub const CREATE_CARDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    set_name TEXT NOT NULL,
    rarity TEXT NOT NULL,
    price_cents INTEGER NOT NULL CHECK(price_cents >= 0),
    stock INTEGER NOT NULL DEFAULT 0 CHECK(stock >= 0)
)
"#;

/// SQL to create the employees table
pub const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    city TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_cards_price ON cards(price_cents)",
];

/// Column list shared by every card SELECT
pub const CARD_COLUMNS: &str = "id, name, set_name, rarity, price_cents, stock";

/// Column list shared by every employee SELECT
pub const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, city";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_CARDS_TABLE, CREATE_EMPLOYEES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
