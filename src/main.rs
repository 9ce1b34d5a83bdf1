//! Cardshop CLI - manage the shop's cards and employees

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use cardshop::config;
use cardshop::output::{error_document, OutputMode};
use cardshop::{CardChanges, CardIdentifier, EmployeeChanges, Error, NewCard, NewEmployee};
use clap::{Parser, Subcommand};
use commands::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "cardshop")]
#[command(version)]
#[command(about = "Trading card shop inventory (SQLite)")]
#[command(long_about = r#"
Cardshop keeps the shop's cards and employees in a single SQLite file.

Cards are addressed by numeric id or by exact name: an identifier made only
of digits is always treated as an id.

Example usage:
  cardshop init-db
  cardshop add "Flame Drake" "Embers Rising" Common 150 --stock 10
  cardshop get "Flame Drake"
  cardshop update 1 --price-cents 175
  cardshop above-price 500
"#)]
struct Cli {
    /// Path to the SQLite database (default: config file, then shop.db next to the binary)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true, default_value = "cardshop.toml")]
    config: PathBuf,

    /// Emit JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tables and seed sample cards and employees
    InitDb {
        /// Do not seed sample data
        #[arg(long)]
        no_sample: bool,
    },

    /// Write a starter config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show row counts
    Stats,

    /// List all cards
    #[command(visible_alias = "list-cards", alias = "list_c")]
    List,

    /// Get a card by id or name
    Get {
        /// Card id or exact name
        identifier: String,
    },

    /// Add a new card
    #[command(allow_negative_numbers = true)]
    Add {
        name: String,
        set_name: String,
        rarity: String,
        price_cents: i64,
        #[arg(long, default_value_t = 0)]
        stock: i64,
    },

    /// Update a card by id or name
    #[command(allow_negative_numbers = true)]
    Update {
        identifier: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        set_name: Option<String>,
        #[arg(long)]
        rarity: Option<String>,
        #[arg(long)]
        price_cents: Option<i64>,
        #[arg(long)]
        stock: Option<i64>,
    },

    /// Delete a card by id or name
    Delete {
        identifier: String,
    },

    /// List cards priced at or above a threshold
    #[command(allow_negative_numbers = true)]
    AbovePrice {
        /// Minimum price in cents (inclusive)
        threshold_cents: i64,
    },

    /// List all employees
    #[command(alias = "list_e")]
    ListEmp,

    /// Get an employee by id
    #[command(alias = "get_emp")]
    GetEmp {
        id: i64,
    },

    /// Add a new employee
    #[command(alias = "add_emp")]
    AddEmp {
        first_name: String,
        last_name: String,
        city: String,
    },

    /// Update an employee by id
    #[command(alias = "update_e")]
    UpdateEmp {
        id: i64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },

    /// Delete an employee by id
    #[command(alias = "delete_e")]
    DeleteEmp {
        id: i64,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::InitDb { .. } => "init-db",
            Commands::InitConfig { .. } => "init-config",
            Commands::Stats => "stats",
            Commands::List => "list",
            Commands::Get { .. } => "get",
            Commands::Add { .. } => "add",
            Commands::Update { .. } => "update",
            Commands::Delete { .. } => "delete",
            Commands::AbovePrice { .. } => "above-price",
            Commands::ListEmp => "list-emp",
            Commands::GetEmp { .. } => "get-emp",
            Commands::AddEmp { .. } => "add-emp",
            Commands::UpdateEmp { .. } => "update-emp",
            Commands::DeleteEmp { .. } => "delete-emp",
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output_mode = OutputMode::from_flag(cli.json);
    let command_name = cli.command.name();

    match run(cli, output_mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(output_mode, command_name, &e);
            ExitCode::FAILURE
        }
    }
}

fn report_failure(output_mode: OutputMode, command: &str, e: &anyhow::Error) {
    let not_found = matches!(e.downcast_ref::<Error>(), Some(Error::NotFound(_)));

    if output_mode.is_human() {
        if not_found {
            println!("Not found");
            tracing::debug!("{:#}", e);
        } else {
            cardshop::ui::error(&format!("{:#}", e));
        }
        return;
    }

    match error_document(command, &format!("{:#}", e)) {
        Ok(doc) => println!("{}", doc),
        Err(err) => tracing::error!("Failed to render error document: {}", err),
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let loaded = config::load_config(Some(&cli.config))?;
    let ctx = Context::new(cli.db.as_deref(), loaded, output_mode);

    match cli.command {
        Commands::InitDb { no_sample } => commands::run_init_db(&ctx, !no_sample),

        Commands::InitConfig { force } => commands::run_init_config(&ctx, &cli.config, force),

        Commands::Stats => commands::run_stats(&ctx),

        Commands::List => commands::run_list_cards(&ctx),

        Commands::Get { identifier } => {
            commands::run_get_card(&ctx, &CardIdentifier::parse(&identifier)?)
        }

        Commands::Add { name, set_name, rarity, price_cents, stock } => {
            let card = NewCard::new(name, set_name, rarity, price_cents).with_stock(stock);
            commands::run_add_card(&ctx, card)
        }

        Commands::Update { identifier, name, set_name, rarity, price_cents, stock } => {
            let changes = CardChanges { name, set_name, rarity, price_cents, stock };
            commands::run_update_card(&ctx, &CardIdentifier::parse(&identifier)?, changes)
        }

        Commands::Delete { identifier } => {
            commands::run_delete_card(&ctx, &CardIdentifier::parse(&identifier)?)
        }

        Commands::AbovePrice { threshold_cents } => commands::run_cards_above(&ctx, threshold_cents),

        Commands::ListEmp => commands::run_list_employees(&ctx),

        Commands::GetEmp { id } => commands::run_get_employee(&ctx, id),

        Commands::AddEmp { first_name, last_name, city } => {
            commands::run_add_employee(&ctx, NewEmployee::new(first_name, last_name, city))
        }

        Commands::UpdateEmp { id, first_name, last_name, city } => {
            let changes = EmployeeChanges { first_name, last_name, city };
            commands::run_update_employee(&ctx, id, changes)
        }

        Commands::DeleteEmp { id } => commands::run_delete_employee(&ctx, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("cardshop").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_underscore_aliases() {
        assert!(matches!(parse(&["list_c"]), Commands::List));
        assert!(matches!(parse(&["list_e"]), Commands::ListEmp));
        assert!(matches!(parse(&["get_emp", "1"]), Commands::GetEmp { id: 1 }));
        assert!(matches!(
            parse(&["add_emp", "Ada", "Lovelace", "London"]),
            Commands::AddEmp { ref first_name, .. } if first_name == "Ada"
        ));
        assert!(matches!(parse(&["update_e", "2", "--city", "Paris"]), Commands::UpdateEmp { id: 2, .. }));
        assert!(matches!(parse(&["delete_e", "3"]), Commands::DeleteEmp { id: 3 }));
    }

    #[test]
    fn test_negative_price_reaches_store() {
        assert!(matches!(
            parse(&["add", "Bad", "Set", "Common", "-5"]),
            Commands::Add { price_cents: -5, .. }
        ));
    }
}
