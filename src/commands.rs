use std::path::{Path, PathBuf};

use cardshop::config::{self, SampleConfig, ShopConfig};
use cardshop::output::{emit_success, OutputMode};
use cardshop::storage::{init_store, ShopStore};
use cardshop::ui::{self, format_cents, header, section, summary_row, theme, Icons};
use cardshop::{Card, CardChanges, CardIdentifier, Employee, EmployeeChanges, Error, NewCard, NewEmployee};
use owo_colors::OwoColorize;

/// Everything a command needs, resolved once at startup
pub struct Context {
    pub db_path: PathBuf,
    pub sample: SampleConfig,
    pub output_mode: OutputMode,
}

impl Context {
    pub fn new(db_flag: Option<&Path>, config: Option<ShopConfig>, output_mode: OutputMode) -> Self {
        let db_path = config::resolve_database_path(db_flag, config.as_ref());
        let sample = config.map(|c| c.sample).unwrap_or_default();
        tracing::debug!("Using store at {}", db_path.display());
        Self {
            db_path,
            sample,
            output_mode,
        }
    }

    fn store(&self) -> cardshop::Result<ShopStore> {
        ShopStore::open(&self.db_path)
    }

    fn is_human(&self) -> bool {
        self.output_mode.is_human()
    }
}

// ========== Store ==========

pub fn run_init_db(ctx: &Context, with_sample: bool) -> anyhow::Result<()> {
    let sample = with_sample.then_some(&ctx.sample);
    let report = init_store(&ctx.db_path, sample)?;

    if ctx.is_human() {
        println!(
            "Initialized DB at {} (sample={})",
            ctx.db_path.display(),
            if with_sample { "yes" } else { "no" }
        );
        if report.cards_inserted > 0 || report.employees_inserted > 0 {
            summary_row("Sample cards:", &report.cards_inserted.to_string());
            summary_row("Sample employees:", &report.employees_inserted.to_string());
        }
    } else {
        let data = serde_json::json!({
            "database": ctx.db_path.display().to_string(),
            "sample": with_sample,
            "seeded": report,
        });
        emit_success(ctx.output_mode, "init-db", data)?;
    }
    Ok(())
}

pub fn run_init_config(ctx: &Context, config_path: &Path, force: bool) -> anyhow::Result<()> {
    let config = ShopConfig {
        database: Some(ctx.db_path.display().to_string()),
        sample: ctx.sample.clone(),
    };
    config::write_config(config_path, &config, force)?;

    if ctx.is_human() {
        ui::success(&format!("Wrote config to {}", config_path.display()));
    } else {
        emit_success(ctx.output_mode, "init-config", serde_json::json!({
            "path": config_path.display().to_string(),
        }))?;
    }
    Ok(())
}

pub fn run_stats(ctx: &Context) -> anyhow::Result<()> {
    let stats = ctx.store()?.stats()?;

    if ctx.is_human() {
        let cards = stats.cards.to_string();
        let employees = stats.employees.to_string();
        header(&format!("Cardshop Statistics ({})", ctx.db_path.display()));
        println!(
            "{}",
            ui::stats_table(&[("Cards", cards.as_str()), ("Employees", employees.as_str())])
        );
    } else {
        emit_success(ctx.output_mode, "stats", stats)?;
    }
    Ok(())
}

// ========== Cards ==========

pub fn run_list_cards(ctx: &Context) -> anyhow::Result<()> {
    let cards = ctx.store()?.list_cards()?;
    print_cards(ctx, "list", &cards, "No cards found.")
}

pub fn run_cards_above(ctx: &Context, threshold_cents: i64) -> anyhow::Result<()> {
    let cards = ctx.store()?.cards_at_or_above_price(threshold_cents)?;
    if ctx.is_human() && !cards.is_empty() {
        section(&format!("Cards at or above {}", format_cents(threshold_cents)));
    }
    print_cards(ctx, "above-price", &cards, "No cards at or above that price.")
}

pub fn run_get_card(ctx: &Context, identifier: &CardIdentifier) -> anyhow::Result<()> {
    let card = ctx
        .store()?
        .get_card(identifier)?
        .ok_or_else(|| Error::NotFound(format!("card {}", identifier)))?;

    if ctx.is_human() {
        print_card(&card);
    } else {
        emit_success(ctx.output_mode, "get", card)?;
    }
    Ok(())
}

pub fn run_add_card(ctx: &Context, card: NewCard) -> anyhow::Result<()> {
    let id = ctx.store()?.add_card(&card)?;

    if ctx.is_human() {
        ui::record_added("card", id);
    } else {
        emit_success(ctx.output_mode, "add", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_update_card(ctx: &Context, identifier: &CardIdentifier, changes: CardChanges) -> anyhow::Result<()> {
    if changes.is_empty() && ctx.is_human() {
        ui::warn("No fields to update were given");
    }
    let updated = ctx.store()?.update_card(identifier, &changes)?;
    report_count(ctx, "update", updated, ui::record_updated)
}

pub fn run_delete_card(ctx: &Context, identifier: &CardIdentifier) -> anyhow::Result<()> {
    let deleted = ctx.store()?.delete_card(identifier)?;
    report_count(ctx, "delete", deleted, ui::record_deleted)
}

// ========== Employees ==========

pub fn run_list_employees(ctx: &Context) -> anyhow::Result<()> {
    let employees = ctx.store()?.list_employees()?;

    if !ctx.is_human() {
        emit_success(ctx.output_mode, "list-emp", employees)?;
    } else if employees.is_empty() {
        println!("{} No employees found.", Icons::EMPTY);
    } else {
        println!("{}", ui::employee_table(&employees));
    }
    Ok(())
}

pub fn run_get_employee(ctx: &Context, id: i64) -> anyhow::Result<()> {
    let employee = ctx
        .store()?
        .get_employee(id)?
        .ok_or_else(|| Error::NotFound(format!("employee #{}", id)))?;

    if ctx.is_human() {
        print_employee(&employee);
    } else {
        emit_success(ctx.output_mode, "get-emp", employee)?;
    }
    Ok(())
}

pub fn run_add_employee(ctx: &Context, employee: NewEmployee) -> anyhow::Result<()> {
    let id = ctx.store()?.add_employee(&employee)?;

    if ctx.is_human() {
        ui::record_added("employee", id);
    } else {
        emit_success(ctx.output_mode, "add-emp", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_update_employee(ctx: &Context, id: i64, changes: EmployeeChanges) -> anyhow::Result<()> {
    if changes.is_empty() && ctx.is_human() {
        ui::warn("No fields to update were given");
    }
    let updated = ctx.store()?.update_employee(id, &changes)?;
    report_count(ctx, "update-emp", updated, ui::record_updated)
}

pub fn run_delete_employee(ctx: &Context, id: i64) -> anyhow::Result<()> {
    let deleted = ctx.store()?.delete_employee(id)?;
    report_count(ctx, "delete-emp", deleted, ui::record_deleted)
}

// ========== Rendering ==========

fn print_cards(ctx: &Context, command: &str, cards: &[Card], empty: &str) -> anyhow::Result<()> {
    if !ctx.is_human() {
        emit_success(ctx.output_mode, command, cards)?;
    } else if cards.is_empty() {
        println!("{} {}", Icons::EMPTY, empty);
    } else {
        println!("{}", ui::card_table(cards));
    }
    Ok(())
}

fn print_card(card: &Card) {
    println!("id={}", card.id);
    println!("name={}", card.name);
    println!("set={}", card.set_name);
    println!("rarity={}", card.rarity);
    println!("price={}", format_cents(card.price_cents).style(theme().price.clone()));
    println!("stock={}", card.stock);
}

fn print_employee(employee: &Employee) {
    println!("id={}", employee.id);
    println!("first_name={}", employee.first_name);
    println!("last_name={}", employee.last_name);
    println!("city={}", employee.city);
}

fn report_count(ctx: &Context, command: &str, count: usize, human: fn(usize)) -> anyhow::Result<()> {
    if ctx.is_human() {
        human(count);
    } else {
        emit_success(ctx.output_mode, command, serde_json::json!({ "rows": count }))?;
    }
    Ok(())
}
