//! Sample data generator
//!
//! Produces pseudo-random cards and employees for seeding an empty store.
//! Card names are `<adjective> <noun><suffix>` drawn from fixed word lists;
//! rarities are weighted and each rarity has its own price band.

use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::model::{NewCard, NewEmployee};

/// Attempts allowed per requested row before a batch is abandoned short.
const ATTEMPTS_PER_ROW: usize = 20;

const ADJECTIVES: &[&str] = &[
    "Flame", "Shadow", "Crystal", "Thunder", "Silver", "Vorpal", "Elder",
    "Ancient", "Mystic", "Phantom", "Gilded", "Searing", "Frost", "Arcane",
];

const NOUNS: &[&str] = &[
    "Drake", "Golem", "Sage", "Warden", "Ranger", "Phoenix", "Titan",
    "Sprite", "Hydra", "Knight", "Serpent", "Djinn", "Colossus", "Revenant",
];

const SUFFIXES: &[&str] = &[
    " of Dawn", " of the Vale", " of Embers", " of Echoes", ", the Unbound",
    " of Shards", " of Storms", " of Twilight", ", Worldshaper", " of Cinders",
    " of Frost", ", Soulbinder", " of Horizons",
];

const SET_NAMES: &[&str] = &[
    "Embers Rising", "Verdant Vale", "Shattered Realms", "Twilight Citadel",
    "Stormcall Saga", "Gilded Empires", "Frozen Expanse",
];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Chloe", "Dmitri", "Elena", "Farid", "Greta", "Hiro",
    "Ines", "Jonas", "Keiko", "Luca", "Maya", "Nils", "Olga", "Pavel",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Bauer", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia",
    "Hoffmann", "Ivanova", "Jensen", "Kowalski", "Laurent", "Moreau", "Novak",
];

const CITIES: &[&str] = &[
    "Berlin", "Lyon", "Porto", "Krakow", "Utrecht", "Bologna", "Gothenburg",
    "Brno", "Ghent", "Valencia",
];

/// Rarities the generator draws from. The store itself accepts any text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Mythic => "Mythic",
        }
    }

    pub fn all() -> &'static [Rarity] {
        &[Rarity::Common, Rarity::Uncommon, Rarity::Rare, Rarity::Mythic]
    }

    /// Inclusive price band in cents. Bands do not overlap.
    pub fn price_band(&self) -> (i64, i64) {
        match self {
            Rarity::Common => (50, 199),
            Rarity::Uncommon => (200, 499),
            Rarity::Rare => (500, 1499),
            Rarity::Mythic => (1500, 3999),
        }
    }

    /// Upper bound for generated stock
    pub fn max_stock(&self) -> i64 {
        match self {
            Rarity::Rare | Rarity::Mythic => 20,
            Rarity::Common | Rarity::Uncommon => 50,
        }
    }

    /// Common 50%, Uncommon 25%, Rare 15%, Mythic 10%
    fn weighted<R: Rng>(rng: &mut R) -> Self {
        let roll: f64 = rng.gen_range(0.0..1.0);
        if roll < 0.50 {
            Rarity::Common
        } else if roll < 0.75 {
            Rarity::Uncommon
        } else if roll < 0.90 {
            Rarity::Rare
        } else {
            Rarity::Mythic
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn pick<'a, R: Rng>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn card_name_space() -> usize {
    ADJECTIVES.len() * NOUNS.len() * SUFFIXES.len()
}

fn employee_name_space() -> usize {
    FIRST_NAMES.len() * LAST_NAMES.len()
}

/// Generate up to `count` cards with unique names.
///
/// The batch never exceeds the number of distinct names, and gives up after
/// 20 attempts per row, so a huge `count` yields a shorter batch rather than
/// looping forever.
pub fn generate_cards(count: usize, seed: Option<u64>) -> Vec<NewCard> {
    let mut rng = rng_for(seed);
    let mut seen = HashSet::new();
    let target = count.min(card_name_space());
    let mut out = Vec::with_capacity(target);

    let max_attempts = target.saturating_mul(ATTEMPTS_PER_ROW);
    let mut attempts = 0;
    while out.len() < target && attempts < max_attempts {
        attempts += 1;
        let name = format!(
            "{} {}{}",
            pick(&mut rng, ADJECTIVES),
            pick(&mut rng, NOUNS),
            pick(&mut rng, SUFFIXES)
        );
        if !seen.insert(name.clone()) {
            continue;
        }

        let rarity = Rarity::weighted(&mut rng);
        let (low, high) = rarity.price_band();
        let price_cents = rng.gen_range(low..=high);
        let stock = rng.gen_range(0..=rarity.max_stock());

        out.push(NewCard {
            name,
            set_name: pick(&mut rng, SET_NAMES).to_string(),
            rarity: rarity.as_str().to_string(),
            price_cents,
            stock,
        });
    }

    if out.len() < count {
        tracing::warn!("Generated only {} of {} requested cards", out.len(), count);
    }
    out
}

/// Generate up to `count` employees with unique first/last name pairs.
pub fn generate_employees(count: usize, seed: Option<u64>) -> Vec<NewEmployee> {
    let mut rng = rng_for(seed);
    let mut seen = HashSet::new();
    let target = count.min(employee_name_space());
    let mut out = Vec::with_capacity(target);

    let max_attempts = target.saturating_mul(ATTEMPTS_PER_ROW);
    let mut attempts = 0;
    while out.len() < target && attempts < max_attempts {
        attempts += 1;
        let first = pick(&mut rng, FIRST_NAMES);
        let last = pick(&mut rng, LAST_NAMES);
        if !seen.insert((first, last)) {
            continue;
        }
        out.push(NewEmployee::new(first, last, pick(&mut rng, CITIES)));
    }

    if out.len() < count {
        tracing::warn!("Generated only {} of {} requested employees", out.len(), count);
    }
    out
}
