//! SQLite storage implementation

use std::path::Path;
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, params};
use crate::{Result, Error};
use crate::config::SampleConfig;
use crate::identifier::CardIdentifier;
use crate::model::{Card, CardChanges, Employee, EmployeeChanges, NewCard, NewEmployee};
use crate::sample;
use super::schema::{self, CARD_COLUMNS, EMPLOYEE_COLUMNS};
use super::update::{build_update, card_assignments, employee_assignments};

/// SQLite-backed storage for cards and employees
pub struct ShopStore {
    conn: Connection,
}

impl ShopStore {
    /// Open a database file (creates it and its parent directory if missing)
    pub fn open(path: &Path) -> Result<Self> {
        let unavailable = |reason: String| Error::StorageUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        ensure_parent_dir(path).map_err(|e| unavailable(e.to_string()))?;
        let conn = Connection::open(path).map_err(|e| unavailable(e.to_string()))?;
        tracing::debug!("Opened store at {}", path.display());

        Self::from_connection(conn).map_err(|e| match e {
            Error::Storage(inner) => unavailable(inner.to_string()),
            other => other,
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::PRAGMAS)?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create both tables if absent. Safe to call any number of times.
    pub fn ensure_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Card Operations ==========

    /// All cards, ascending by id
    pub fn list_cards(&self) -> Result<Vec<Card>> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM cards ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let cards = stmt
            .query_map([], row_to_card)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    /// Get a card by id or exact name
    pub fn get_card(&self, identifier: &CardIdentifier) -> Result<Option<Card>> {
        let sql = format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE {} = ?1",
            identifier.column()
        );
        let key = key_param(identifier);
        self.conn
            .query_row(&sql, [key.as_ref()], row_to_card)
            .optional()
            .map_err(Into::into)
    }

    /// Insert a card and return its new id
    pub fn add_card(&self, card: &NewCard) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO cards (name, set_name, rarity, price_cents, stock)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![card.name, card.set_name, card.rarity, card.price_cents, card.stock],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!("Added card #{} ({})", id, card.name);
        Ok(id)
    }

    /// Rewrite only the supplied fields of one card.
    ///
    /// Returns the number of rows changed. An empty change set returns 0
    /// without touching the store.
    pub fn update_card(&self, identifier: &CardIdentifier, changes: &CardChanges) -> Result<usize> {
        let Some((sql, values)) = build_update(
            "cards",
            card_assignments(changes),
            identifier.column(),
            key_param(identifier),
        ) else {
            tracing::debug!("No fields supplied for card {}, skipping update", identifier);
            return Ok(0);
        };

        let params_refs: Vec<&dyn ToSql> = values.iter().map(|p| p.as_ref()).collect();
        let affected = self.conn.execute(&sql, params_refs.as_slice())?;
        tracing::debug!("Updated {} card row(s) for {}", affected, identifier);
        Ok(affected)
    }

    /// Delete one card, returning the number of rows removed
    pub fn delete_card(&self, identifier: &CardIdentifier) -> Result<usize> {
        let sql = format!("DELETE FROM cards WHERE {} = ?1", identifier.column());
        let key = key_param(identifier);
        let affected = self.conn.execute(&sql, [key.as_ref()])?;
        tracing::debug!("Deleted {} card row(s) for {}", affected, identifier);
        Ok(affected)
    }

    /// Cards priced at or above `threshold_cents`, ascending by id
    pub fn cards_at_or_above_price(&self, threshold_cents: i64) -> Result<Vec<Card>> {
        let sql = format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE price_cents >= ?1 ORDER BY id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let cards = stmt
            .query_map([threshold_cents], row_to_card)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    /// Count all cards
    pub fn count_cards(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Employee Operations ==========

    /// All employees, ascending by id
    pub fn list_employees(&self) -> Result<Vec<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let employees = stmt
            .query_map([], row_to_employee)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(employees)
    }

    /// Get an employee by id
    pub fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1");
        self.conn
            .query_row(&sql, [id], row_to_employee)
            .optional()
            .map_err(Into::into)
    }

    /// Insert an employee and return the new id
    pub fn add_employee(&self, employee: &NewEmployee) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO employees (first_name, last_name, city) VALUES (?1, ?2, ?3)",
            params![employee.first_name, employee.last_name, employee.city],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!("Added employee #{}", id);
        Ok(id)
    }

    /// Rewrite only the supplied fields of one employee
    pub fn update_employee(&self, id: i64, changes: &EmployeeChanges) -> Result<usize> {
        let Some((sql, values)) =
            build_update("employees", employee_assignments(changes), "id", Box::new(id))
        else {
            tracing::debug!("No fields supplied for employee #{}, skipping update", id);
            return Ok(0);
        };

        let params_refs: Vec<&dyn ToSql> = values.iter().map(|p| p.as_ref()).collect();
        let affected = self.conn.execute(&sql, params_refs.as_slice())?;
        tracing::debug!("Updated {} employee row(s) for #{}", affected, id);
        Ok(affected)
    }

    /// Delete an employee by id
    pub fn delete_employee(&self, id: i64) -> Result<usize> {
        let affected = self.conn.execute("DELETE FROM employees WHERE id = ?1", [id])?;
        tracing::debug!("Deleted {} employee row(s) for #{}", affected, id);
        Ok(affected)
    }

    /// Count all employees
    pub fn count_employees(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Seeding ==========

    /// Insert a batch of cards in one transaction, skipping name collisions.
    /// Returns the number of rows actually inserted.
    pub fn seed_cards(&mut self, cards: &[NewCard]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO cards (name, set_name, rarity, price_cents, stock) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for card in cards {
                inserted += stmt.execute(params![
                    card.name,
                    card.set_name,
                    card.rarity,
                    card.price_cents,
                    card.stock,
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Insert a batch of employees in one transaction
    pub fn seed_employees(&mut self, employees: &[NewEmployee]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO employees (first_name, last_name, city) VALUES (?1, ?2, ?3)",
            )?;
            for employee in employees {
                inserted += stmt.execute(params![
                    employee.first_name,
                    employee.last_name,
                    employee.city,
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Seed every empty table with generated rows.
    ///
    /// Each table is checked on its own row count, so a store with cards but
    /// no employees still gets sample employees.
    pub fn seed_sample(&mut self, config: &SampleConfig) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        if self.count_cards()? == 0 {
            let cards = sample::generate_cards(config.cards, config.seed);
            report.cards_inserted = self.seed_cards(&cards)?;
            tracing::info!("Seeded {} sample card(s)", report.cards_inserted);
        } else {
            tracing::debug!("cards table not empty, skipping card seeding");
        }

        if self.count_employees()? == 0 {
            let employees = sample::generate_employees(config.employees, config.seed);
            report.employees_inserted = self.seed_employees(&employees)?;
            tracing::info!("Seeded {} sample employee(s)", report.employees_inserted);
        } else {
            tracing::debug!("employees table not empty, skipping employee seeding");
        }

        Ok(report)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            cards: self.count_cards()?,
            employees: self.count_employees()?,
        })
    }
}

/// Open (or create) the store at `path`, create the schema, and seed empty
/// tables when `sample` is given.
pub fn init_store(path: &Path, sample: Option<&SampleConfig>) -> Result<SeedReport> {
    let mut store = ShopStore::open(path)?;
    tracing::info!("Initialized schema at {}", path.display());
    match sample {
        Some(config) => store.seed_sample(config),
        None => Ok(SeedReport::default()),
    }
}

fn ensure_parent_dir(db_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::debug!("Created directory {}", parent.display());
        }
    }
    Ok(())
}

fn key_param(identifier: &CardIdentifier) -> Box<dyn ToSql> {
    match identifier {
        CardIdentifier::ById(id) => Box::new(*id),
        CardIdentifier::ByName(name) => Box::new(name.clone()),
    }
}

fn row_to_card(row: &rusqlite::Row) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get("id")?,
        name: row.get("name")?,
        set_name: row.get("set_name")?,
        rarity: row.get("rarity")?,
        price_cents: row.get("price_cents")?,
        stock: row.get("stock")?,
    })
}

fn row_to_employee(row: &rusqlite::Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        city: row.get("city")?,
    })
}

/// Rows written by a seeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SeedReport {
    pub cards_inserted: usize,
    pub employees_inserted: usize,
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub cards: usize,
    pub employees: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flame_drake() -> NewCard {
        NewCard::new("Flame Drake", "Embers Rising", "Common", 150).with_stock(10)
    }

    fn by_name(name: &str) -> CardIdentifier {
        CardIdentifier::ByName(name.to_string())
    }

    #[test]
    fn test_card_crud() {
        let store = ShopStore::open_in_memory().unwrap();

        let id = store.add_card(&flame_drake()).unwrap();

        let by_name = store.get_card(&by_name("Flame Drake")).unwrap().unwrap();
        assert_eq!(by_name.id, id);
        assert_eq!(by_name.set_name, "Embers Rising");
        assert_eq!(by_name.rarity, "Common");
        assert_eq!(by_name.price_cents, 150);
        assert_eq!(by_name.stock, 10);

        let by_id = store.get_card(&CardIdentifier::parse(&id.to_string()).unwrap()).unwrap().unwrap();
        assert_eq!(by_id, by_name);
    }

    #[test]
    fn test_stock_defaults_to_zero() {
        let store = ShopStore::open_in_memory().unwrap();
        let id = store.add_card(&NewCard::new("Frost Sage", "Frozen Expanse", "Rare", 900)).unwrap();
        let card = store.get_card(&CardIdentifier::ById(id)).unwrap().unwrap();
        assert_eq!(card.stock, 0);
    }

    #[test]
    fn test_name_lookup_is_case_sensitive() {
        let store = ShopStore::open_in_memory().unwrap();
        store.add_card(&flame_drake()).unwrap();
        assert!(store.get_card(&by_name("flame drake")).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let store = ShopStore::open_in_memory().unwrap();
        store.add_card(&flame_drake()).unwrap();

        let err = store
            .add_card(&NewCard::new("Flame Drake", "Verdant Vale", "Rare", 700))
            .unwrap_err();
        assert!(matches!(err, Error::UniqueViolation(_)));
        assert_eq!(store.count_cards().unwrap(), 1);
    }

    #[test]
    fn test_negative_price_and_stock_rejected() {
        let store = ShopStore::open_in_memory().unwrap();

        let err = store.add_card(&NewCard::new("Cheap", "Set", "Common", -1)).unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));

        let err = store
            .add_card(&NewCard::new("Oversold", "Set", "Common", 10).with_stock(-3))
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));

        assert_eq!(store.count_cards().unwrap(), 0);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let store = ShopStore::open_in_memory().unwrap();
        let id = store.add_card(&flame_drake()).unwrap();
        let before = store.get_card(&id.into()).unwrap().unwrap();

        assert_eq!(store.update_card(&id.into(), &CardChanges::new()).unwrap(), 0);
        assert_eq!(store.get_card(&id.into()).unwrap().unwrap(), before);
    }

    #[test]
    fn test_update_changes_only_supplied_fields() {
        let store = ShopStore::open_in_memory().unwrap();
        let id = store.add_card(&flame_drake()).unwrap();
        let before = store.get_card(&id.into()).unwrap().unwrap();

        assert_eq!(store.update_card(&id.into(), &CardChanges::new().stock(5)).unwrap(), 1);

        let after = store.get_card(&id.into()).unwrap().unwrap();
        assert_eq!(after.stock, 5);
        assert_eq!(after, Card { stock: 5, ..before });
    }

    #[test]
    fn test_update_by_name_and_missing() {
        let store = ShopStore::open_in_memory().unwrap();
        store.add_card(&flame_drake()).unwrap();

        let changes = CardChanges::new().price_cents(175);
        assert_eq!(store.update_card(&by_name("Flame Drake"), &changes).unwrap(), 1);
        assert_eq!(store.update_card(&by_name("Nope"), &changes).unwrap(), 0);
        assert_eq!(store.update_card(&CardIdentifier::ById(999), &changes).unwrap(), 0);
    }

    #[test]
    fn test_update_enforces_constraints() {
        let store = ShopStore::open_in_memory().unwrap();
        let first = store.add_card(&flame_drake()).unwrap();
        store.add_card(&NewCard::new("Shadow Golem", "Twilight Citadel", "Rare", 800)).unwrap();

        let err = store
            .update_card(&first.into(), &CardChanges::new().name("Shadow Golem"))
            .unwrap_err();
        assert!(matches!(err, Error::UniqueViolation(_)));

        let err = store
            .update_card(&first.into(), &CardChanges::new().stock(-1))
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[test]
    fn test_delete_card() {
        let store = ShopStore::open_in_memory().unwrap();
        let id = store.add_card(&flame_drake()).unwrap();
        store.add_card(&NewCard::new("Shadow Golem", "Twilight Citadel", "Rare", 800)).unwrap();

        assert_eq!(store.delete_card(&CardIdentifier::ById(999)).unwrap(), 0);
        assert_eq!(store.delete_card(&by_name("Nope")).unwrap(), 0);

        assert_eq!(store.delete_card(&id.into()).unwrap(), 1);
        assert!(store.get_card(&id.into()).unwrap().is_none());

        assert_eq!(store.delete_card(&by_name("Shadow Golem")).unwrap(), 1);
        assert!(store.get_card(&by_name("Shadow Golem")).unwrap().is_none());
    }

    #[test]
    fn test_digit_only_name_unreachable_by_name() {
        let store = ShopStore::open_in_memory().unwrap();
        let id = store.add_card(&NewCard::new("1999", "Retro", "Common", 100)).unwrap();

        let ident = CardIdentifier::parse("1999").unwrap();
        assert_eq!(ident, CardIdentifier::ById(1999));
        assert!(store.get_card(&ident).unwrap().is_none());
        assert_eq!(store.get_card(&id.into()).unwrap().unwrap().name, "1999");
    }

    #[test]
    fn test_list_cards_ascending_by_id() {
        let store = ShopStore::open_in_memory().unwrap();
        for name in ["Zeta", "Alpha", "Mu"] {
            store.add_card(&NewCard::new(name, "Set", "Common", 100)).unwrap();
        }
        store.delete_card(&by_name("Alpha")).unwrap();
        store.add_card(&NewCard::new("Beta", "Set", "Common", 100)).unwrap();

        let cards = store.list_cards().unwrap();
        let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Mu", "Beta"]);
        assert!(cards.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_cards_at_or_above_price() {
        let store = ShopStore::open_in_memory().unwrap();
        store.add_card(&NewCard::new("Mythic One", "Set", "Rare", 1499)).unwrap();
        store.add_card(&flame_drake()).unwrap();
        store.add_card(&NewCard::new("Exactly Five", "Set", "Rare", 500)).unwrap();

        let cards = store.cards_at_or_above_price(500).unwrap();
        let prices: Vec<_> = cards.iter().map(|c| c.price_cents).collect();
        assert_eq!(prices, [1499, 500]);
        assert!(cards[0].id < cards[1].id);
    }

    #[test]
    fn test_price_roundtrip() {
        let store = ShopStore::open_in_memory().unwrap();
        let id = store.add_card(&flame_drake()).unwrap();
        store.update_card(&id.into(), &CardChanges::new().price_cents(225)).unwrap();

        let card = store.get_card(&id.into()).unwrap().unwrap();
        assert_eq!(card.price_cents, 225);
        assert_eq!(card.name, "Flame Drake");
        assert_eq!(card.set_name, "Embers Rising");
        assert_eq!(card.rarity, "Common");
        assert_eq!(card.stock, 10);
    }

    #[test]
    fn test_employee_crud() {
        let store = ShopStore::open_in_memory().unwrap();

        let id = store.add_employee(&NewEmployee::new("Ada", "Lovelace", "London")).unwrap();
        let twin = store.add_employee(&NewEmployee::new("Ada", "Lovelace", "London")).unwrap();
        assert_ne!(id, twin);

        let employee = store.get_employee(id).unwrap().unwrap();
        assert_eq!((employee.first_name.as_str(), employee.last_name.as_str()), ("Ada", "Lovelace"));

        assert_eq!(store.update_employee(id, &EmployeeChanges::new()).unwrap(), 0);
        assert_eq!(store.update_employee(id, &EmployeeChanges::new().city("Paris")).unwrap(), 1);
        let employee = store.get_employee(id).unwrap().unwrap();
        assert_eq!(employee.city, "Paris");
        assert_eq!(employee.last_name, "Lovelace");

        assert_eq!(store.update_employee(999, &EmployeeChanges::new().city("Rome")).unwrap(), 0);

        assert_eq!(store.delete_employee(id).unwrap(), 1);
        assert_eq!(store.delete_employee(id).unwrap(), 0);
        assert!(store.get_employee(id).unwrap().is_none());

        let ids: Vec<_> = store.list_employees().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, [twin]);
    }

    #[test]
    fn test_ensure_schema_idempotent() {
        let store = ShopStore::open_in_memory().unwrap();
        store.add_card(&flame_drake()).unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.count_cards().unwrap(), 1);
    }

    #[test]
    fn test_seed_sample_per_table() {
        let mut store = ShopStore::open_in_memory().unwrap();
        store.add_card(&flame_drake()).unwrap();

        let sample = SampleConfig { cards: 10, employees: 4, seed: Some(7) };
        let report = store.seed_sample(&sample).unwrap();
        assert_eq!(report.cards_inserted, 0);
        assert_eq!(report.employees_inserted, 4);
        assert_eq!(store.count_cards().unwrap(), 1);

        let again = store.seed_sample(&sample).unwrap();
        assert_eq!(again, SeedReport::default());
        assert_eq!(store.count_employees().unwrap(), 4);
    }

    #[test]
    fn test_seed_cards_skips_collisions() {
        let mut store = ShopStore::open_in_memory().unwrap();
        let batch = vec![
            flame_drake(),
            NewCard::new("Flame Drake", "Other", "Rare", 600),
            NewCard::new("Shadow Golem", "Twilight Citadel", "Rare", 800),
        ];
        assert_eq!(store.seed_cards(&batch).unwrap(), 2);
        assert_eq!(store.stats().unwrap().cards, 2);
    }
}
