use tabled::{settings::Style, Table, Tabled};

use crate::model::{Card, Employee};
use crate::ui::format_cents;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "#")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Set")]
    set_name: String,
    #[tabled(rename = "Rarity")]
    rarity: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: i64,
}

impl From<&Card> for CardRow {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            name: card.name.clone(),
            set_name: card.set_name.clone(),
            rarity: card.rarity.clone(),
            price: format_cents(card.price_cents),
            stock: card.stock,
        }
    }
}

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "#")]
    id: i64,
    #[tabled(rename = "First name")]
    first_name: String,
    #[tabled(rename = "Last name")]
    last_name: String,
    #[tabled(rename = "City")]
    city: String,
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            city: employee.city.clone(),
        }
    }
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

/// Rounded table of cards; empty string for no cards
pub fn card_table(cards: &[Card]) -> String {
    if cards.is_empty() {
        return String::new();
    }
    let rows: Vec<CardRow> = cards.iter().map(CardRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn employee_table(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return String::new();
    }
    let rows: Vec<EmployeeRow> = employees.iter().map(EmployeeRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
