//! `medstock` command-line front end.
//!
//! Parses and validates input, generates ids, issues store operations and
//! renders the results. All inventory rules live in the library crates.

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use medstock_core::ItemId;
use medstock_infra::{DynInventoryStore, StoreConfig};
use medstock_inventory::{AlertSettings, InventoryItem, ItemFilter, ReportPeriod, StockAdjustment};

use crate::render::Output;

#[derive(Parser)]
#[command(name = "medstock", about = "Pharmacy and medical-supply inventory tracker", version)]
struct Cli {
    /// Directory holding the inventory documents (overrides MEDSTOCK_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Load the demo catalog if the catalog is empty
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    seed_demo: bool,

    /// Render command output as pretty JSON; logs go to stderr as JSON lines
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default documents in the data directory
    Init,
    /// Catalog management
    #[command(subcommand)]
    Items(ItemsCommand),
    /// List distinct categories
    Categories,
    /// Manual stock adjustments
    #[command(subcommand)]
    Stock(StockCommand),
    /// Record a sale (fails when stock is insufficient)
    Sell {
        id: String,
        quantity: i64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Full stock movement ledger
    Movements,
    /// Dashboard counters plus low stock and expiring items
    Dashboard,
    /// Reports
    #[command(subcommand)]
    Report(ReportCommand),
    /// Alert settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand)]
enum ItemsCommand {
    /// List items, optionally filtered
    List {
        /// Case-insensitive match on name or SKU
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    Show {
        id: String,
    },
    Add(NewItemArgs),
    /// Change fields of an existing item
    Update(UpdateItemArgs),
    Delete {
        id: String,
    },
}

#[derive(Args)]
struct NewItemArgs {
    /// Explicit id (generated when omitted)
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    name: String,
    #[arg(long)]
    sku: String,
    #[arg(long)]
    category: String,
    #[arg(long, default_value_t = 0)]
    quantity: i64,
    /// Expiration date (YYYY-MM-DD)
    #[arg(long)]
    expires: Option<NaiveDate>,
    #[arg(long)]
    supplier: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long, default_value_t = 10)]
    threshold: i64,
}

#[derive(Args)]
struct UpdateItemArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    sku: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    quantity: Option<i64>,
    #[arg(long, conflicts_with = "no_expiry")]
    expires: Option<NaiveDate>,
    /// Remove the expiration date
    #[arg(long, action = ArgAction::SetTrue)]
    no_expiry: bool,
    #[arg(long)]
    supplier: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    threshold: Option<i64>,
}

#[derive(Subcommand)]
enum StockCommand {
    /// Add units
    Add(StockArgs),
    /// Remove units (clamps at zero)
    Remove(StockArgs),
}

#[derive(Args)]
struct StockArgs {
    id: String,
    quantity: i64,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodArg {
    #[value(name = "7days")]
    Last7Days,
    #[value(name = "30days")]
    Last30Days,
    All,
    Custom,
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Per-category stock summary
    Summary,
    /// Items with an expiration date, soonest first
    Expiration,
    /// Stock movements within a period, newest first
    Movements {
        #[arg(long, value_enum, default_value = "30days")]
        period: PeriodArg,
        /// First day (custom period)
        #[arg(long, required_if_eq("period", "custom"))]
        start: Option<NaiveDate>,
        /// Last day (custom period)
        #[arg(long, required_if_eq("period", "custom"))]
        end: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    Show,
    /// Change individual settings
    Set {
        #[arg(long)]
        low_stock_threshold: Option<i64>,
        #[arg(long)]
        expiration_alert_days: Option<i64>,
        #[arg(long)]
        email_alerts: Option<bool>,
        #[arg(long)]
        alert_email: Option<String>,
    },
}

fn init_logging(json: bool) {
    if json {
        medstock_observability::init();
    } else {
        medstock_observability::init_pretty();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json);

    let mut config = StoreConfig::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        config = config.with_data_dir(dir);
    }
    if cli.seed_demo {
        config = config.with_seed_demo(true);
    }
    tracing::debug!(data_dir = ?config.data_dir, seed_demo = config.seed_demo, "opening store");
    let store = config.open().context("failed to open inventory store")?;
    let out = Output::new(cli.json);

    match cli.command {
        Commands::Init => {
            out.message(&format!(
                "Inventory initialized ({} items)",
                store.list_items()?.len()
            ));
        }
        Commands::Items(command) => handle_items_command(&store, &out, command)?,
        Commands::Categories => out.lines(&store.list_categories()?)?,
        Commands::Stock(command) => handle_stock_command(&store, &out, command)?,
        Commands::Sell {
            id,
            quantity,
            notes,
        } => {
            let id = parse_id(&id)?;
            if !store.record_sale(&id, quantity, notes)? {
                bail!("failed to record sale for item {id}: item not found or insufficient stock");
            }
            let item = store
                .get_item(&id)?
                .ok_or_else(|| anyhow!("item {id} disappeared after sale"))?;
            out.message(&format!(
                "Sale recorded; {} now has {} in stock",
                item.name, item.quantity
            ));
        }
        Commands::Movements => out.movements(&store.list_movements()?)?,
        Commands::Dashboard => out.dashboard(
            &store.dashboard_stats()?,
            &store.low_stock_items()?,
            &store.expiring_soon_items()?,
            store.clock(),
        )?,
        Commands::Report(command) => handle_report_command(&store, &out, command)?,
        Commands::Settings(command) => handle_settings_command(&store, &out, command)?,
    }

    Ok(())
}

fn parse_id(raw: &str) -> Result<ItemId> {
    raw.parse::<ItemId>()
        .with_context(|| format!("invalid item id '{raw}'"))
}

fn handle_items_command(store: &DynInventoryStore, out: &Output, command: ItemsCommand) -> Result<()> {
    match command {
        ItemsCommand::List { search, category } => {
            let filter = ItemFilter { search, category };
            out.items(&store.search_items(&filter)?)?;
        }
        ItemsCommand::Show { id } => {
            let id = parse_id(&id)?;
            let item = store
                .get_item(&id)?
                .ok_or_else(|| anyhow!("item {id} not found"))?;
            out.item(&item)?;
        }
        ItemsCommand::Add(args) => {
            let id = match args.id.as_deref() {
                Some(raw) => parse_id(raw)?,
                None => store.generate_item_id(),
            };
            if store.get_item(&id)?.is_some() {
                bail!("an item with id {id} already exists");
            }
            let item = InventoryItem {
                id,
                name: args.name,
                sku: args.sku,
                category: args.category,
                quantity: args.quantity,
                expiration_date: args.expires,
                supplier: args.supplier,
                location: args.location,
                low_stock_threshold: args.threshold,
            };
            item.validate().context("invalid item")?;
            store.add_item(item.clone())?;
            out.item(&item)?;
        }
        ItemsCommand::Update(args) => {
            let id = parse_id(&args.id)?;
            let mut item = store
                .get_item(&id)?
                .ok_or_else(|| anyhow!("item {id} not found"))?;
            if let Some(name) = args.name {
                item.name = name;
            }
            if let Some(sku) = args.sku {
                item.sku = sku;
            }
            if let Some(category) = args.category {
                item.category = category;
            }
            if let Some(quantity) = args.quantity {
                item.quantity = quantity;
            }
            if args.no_expiry {
                item.expiration_date = None;
            } else if let Some(expires) = args.expires {
                item.expiration_date = Some(expires);
            }
            if let Some(supplier) = args.supplier {
                item.supplier = Some(supplier);
            }
            if let Some(location) = args.location {
                item.location = Some(location);
            }
            if let Some(threshold) = args.threshold {
                item.low_stock_threshold = threshold;
            }
            item.validate().context("invalid item")?;
            if !store.update_item(item.clone())? {
                bail!("failed to save item {id}");
            }
            out.item(&item)?;
        }
        ItemsCommand::Delete { id } => {
            let id = parse_id(&id)?;
            if !store.delete_item(&id)? {
                bail!("failed to delete item {id}: not found");
            }
            out.message(&format!("Item {id} deleted"));
        }
    }
    Ok(())
}

fn handle_stock_command(store: &DynInventoryStore, out: &Output, command: StockCommand) -> Result<()> {
    let (adjustment, args) = match command {
        StockCommand::Add(args) => (StockAdjustment::Add, args),
        StockCommand::Remove(args) => (StockAdjustment::Remove, args),
    };
    let id = parse_id(&args.id)?;
    let movement = store
        .adjust_stock(&id, adjustment, args.quantity, args.notes)?
        .ok_or_else(|| anyhow!("item {id} not found"))?;
    out.movements(std::slice::from_ref(&movement))
}

fn handle_report_command(store: &DynInventoryStore, out: &Output, command: ReportCommand) -> Result<()> {
    match command {
        ReportCommand::Summary => out.summary(&store.inventory_summary()?),
        ReportCommand::Expiration => out.expiration(&store.expiration_report()?),
        ReportCommand::Movements { period, start, end } => {
            let period = match period {
                PeriodArg::Last7Days => ReportPeriod::Last7Days,
                PeriodArg::Last30Days => ReportPeriod::Last30Days,
                PeriodArg::All => ReportPeriod::AllTime,
                PeriodArg::Custom => {
                    let (Some(start), Some(end)) = (start, end) else {
                        bail!("--start and --end are required for a custom period");
                    };
                    if start > end {
                        bail!("--start ({start}) is after --end ({end})");
                    }
                    ReportPeriod::Custom { start, end }
                }
            };
            out.movement_report(&store.stock_movement_report_for(period)?)
        }
    }
}

fn handle_settings_command(
    store: &DynInventoryStore,
    out: &Output,
    command: SettingsCommand,
) -> Result<()> {
    match command {
        SettingsCommand::Show => out.settings(&store.settings()?),
        SettingsCommand::Set {
            low_stock_threshold,
            expiration_alert_days,
            email_alerts,
            alert_email,
        } => {
            let current = store.settings()?;
            let settings = AlertSettings {
                low_stock_threshold: low_stock_threshold.unwrap_or(current.low_stock_threshold),
                expiration_alert_days: expiration_alert_days.unwrap_or(current.expiration_alert_days),
                email_alerts: email_alerts.unwrap_or(current.email_alerts),
                alert_email: alert_email.or(current.alert_email),
            };
            if settings.low_stock_threshold < 0 || settings.expiration_alert_days < 0 {
                bail!("thresholds must not be negative");
            }
            store.put_settings(settings)?;
            out.settings(&store.settings()?)
        }
    }
}
