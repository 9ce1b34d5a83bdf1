//! Record types for the shop store
//!
//! `Card` and `Employee` are full rows as read back from the store.
//! `NewCard` / `NewEmployee` are insert payloads, and `CardChanges` /
//! `EmployeeChanges` carry a partial update where only the fields that are
//! `Some` are written.

use serde::{Deserialize, Serialize};

/// A sellable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Surrogate key assigned by the store
    pub id: i64,
    /// Unique across all cards
    pub name: String,
    pub set_name: String,
    /// Free-form; the sample generator only uses Common/Uncommon/Rare/Mythic
    pub rarity: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Insert payload for a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub name: String,
    pub set_name: String,
    pub rarity: String,
    pub price_cents: i64,
    pub stock: i64,
}

impl NewCard {
    /// Create a card payload with zero stock
    pub fn new(
        name: impl Into<String>,
        set_name: impl Into<String>,
        rarity: impl Into<String>,
        price_cents: i64,
    ) -> Self {
        Self {
            name: name.into(),
            set_name: set_name.into(),
            rarity: rarity.into(),
            price_cents,
            stock: 0,
        }
    }

    /// Set the initial stock
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }
}

/// Partial update for a card. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardChanges {
    pub name: Option<String>,
    pub set_name: Option<String>,
    pub rarity: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
}

impl CardChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_name(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = Some(set_name.into());
        self
    }

    pub fn rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.set_name.is_none()
            && self.rarity.is_none()
            && self.price_cents.is_none()
            && self.stock.is_none()
    }
}

/// A shop staff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
}

/// Insert payload for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
}

impl NewEmployee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            city: city.into(),
        }
    }
}

/// Partial update for an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
}

impl EmployeeChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.city.is_none()
    }
}
