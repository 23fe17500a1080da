use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fam::cli::{
    handle_account_command, handle_audit_command, handle_budget_command, handle_record_command,
    handle_register_command, handle_transaction_command, handle_user_command,
};
use fam::config::{paths::FamPaths, settings::Settings};
use fam::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fam",
    version,
    about = "Family Allowance Moderator",
    long_about = "FAM tracks a child's spending against per-category budgets. \
                  Depending on the child's type, going over a budget warns them, \
                  locks the category, or freezes the whole account."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a user with a bank account and category budgets
    Register(fam::cli::RegisterArgs),

    /// Record a purchase against a category budget
    Record(fam::cli::RecordArgs),

    /// User commands
    #[command(subcommand)]
    User(fam::cli::UserCommands),

    /// Show a user's budgets
    Budget(fam::cli::BudgetArgs),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(fam::cli::TransactionCommands),

    /// Account commands
    #[command(subcommand)]
    Account(fam::cli::AccountCommands),

    /// Show recent audit log entries
    Audit(fam::cli::AuditArgs),

    /// Initialize the data directory and write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("FAM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FamPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Register(args)) => {
            handle_register_command(&storage, &settings, args)?;
        }
        Some(Commands::Record(args)) => {
            handle_record_command(&storage, &settings, args)?;
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, cmd)?;
        }
        Some(Commands::Budget(args)) => {
            handle_budget_command(&storage, args)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Account(cmd)) => {
            handle_account_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit(args)) => {
            handle_audit_command(&storage, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing FAM at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Run 'fam register --help' to add a user.");
        }
        Some(Commands::Config) => {
            println!("FAM Configuration");
            println!("=================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!(
                "Initialized:      {}",
                if storage.is_initialized() { "Yes" } else { "No" }
            );
            println!();
            println!("Settings:");
            println!(
                "  Warning thresholds: angel {}, rebel {}, troublemaker {}",
                settings.warning_thresholds.angel,
                settings.warning_thresholds.rebel,
                settings.warning_thresholds.trouble_maker
            );
            println!("  Angel minimum age:  {}", settings.angel_minimum_age);
            println!(
                "  Saving accounts:    {} transactions per {} days",
                settings.saving.max_transactions, settings.saving.window_days
            );
            println!("  Low balance below:  {}", settings.low_balance_threshold);
        }
        None => {
            println!("FAM - Family Allowance Moderator");
            println!();
            println!("Run 'fam --help' for usage information.");
        }
    }

    Ok(())
}
