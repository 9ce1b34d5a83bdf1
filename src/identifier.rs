//! Card identifiers - numeric id or exact card name
//!
//! A raw identifier made only of ASCII digits (`^[0-9]+$`) always addresses the
//! primary key. Anything else addresses the unique `name` column, compared
//! exactly and case-sensitively.
//!
//! A card whose name consists only of digits therefore cannot be reached by
//! name; it must be addressed by its id.

use crate::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static NUMERIC: OnceLock<Regex> = OnceLock::new();

fn numeric_pattern() -> &'static Regex {
    NUMERIC.get_or_init(|| Regex::new(r"^[0-9]+$").expect("static pattern is valid"))
}

/// How a caller addresses a single card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardIdentifier {
    /// Match the surrogate key
    ById(i64),
    /// Match the unique name exactly
    ByName(String),
}

impl CardIdentifier {
    /// Classify a raw identifier string.
    ///
    /// Fails only when the string is all digits but does not fit in an `i64`,
    /// since no row id can ever match it.
    pub fn parse(raw: &str) -> Result<Self> {
        if numeric_pattern().is_match(raw) {
            let id = raw
                .parse::<i64>()
                .map_err(|_| Error::InvalidIdentifier(format!("id out of range: {}", raw)))?;
            Ok(CardIdentifier::ById(id))
        } else {
            Ok(CardIdentifier::ByName(raw.to_string()))
        }
    }

    /// Column the identifier is matched against
    pub fn column(&self) -> &'static str {
        match self {
            CardIdentifier::ById(_) => "id",
            CardIdentifier::ByName(_) => "name",
        }
    }
}

impl FromStr for CardIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<i64> for CardIdentifier {
    fn from(id: i64) -> Self {
        CardIdentifier::ById(id)
    }
}

impl fmt::Display for CardIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardIdentifier::ById(id) => write!(f, "#{}", id),
            CardIdentifier::ByName(name) => write!(f, "'{}'", name),
        }
    }
}
