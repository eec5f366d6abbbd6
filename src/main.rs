use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gastos::audit::AuditLogger;
use gastos::backend::HttpBackend;
use gastos::cli::{
    handle_audit_command, handle_category_command, handle_config_command, handle_expense_command,
    CategoryCommands, ConfigCommands, ExpenseCommands,
};
use gastos::config::{GastosPaths, Settings};
use gastos::logging::init_tracing;
use gastos::services::SyncController;

#[derive(Parser)]
#[command(
    name = "gastos",
    author = "Kaylee Beyene",
    version,
    about = "Record expenses, categories and installment purchases",
    long_about = "gastos is a terminal client for a personal expense tracker. \
                  Expenses and categories live in a backend service; every change \
                  is sent there first and the local view is refreshed from it."
)]
struct Cli {
    /// Backend base URL (overrides the saved setting)
    #[arg(long, global = true, env = "GASTOS_API_URL")]
    api_url: Option<String>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show recent changes recorded in the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = GastosPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let api_url = cli.api_url.clone().unwrap_or_else(|| settings.api_url.clone());
    let audit = AuditLogger::new(paths.audit_log());

    match cli.command {
        Some(Commands::Category(cmd)) => {
            let controller = build_controller(&api_url, &settings, &audit)?;
            handle_category_command(&controller, cmd).await?;
        }
        Some(Commands::Expense(cmd)) => {
            let controller = build_controller(&api_url, &settings, &audit)?;
            handle_expense_command(&controller, &settings, cmd).await?;
        }
        Some(Commands::Config(cmd)) => {
            handle_config_command(&paths, &mut settings, &api_url, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&audit, limit)?;
        }
        None => {
            println!("gastos - expense tracking from the terminal");
            println!();
            println!("Run 'gastos --help' for usage information.");
        }
    }

    Ok(())
}

fn build_controller(
    api_url: &str,
    settings: &Settings,
    audit: &AuditLogger,
) -> Result<SyncController<HttpBackend>> {
    let backend = Arc::new(HttpBackend::new(api_url)?);
    let controller = SyncController::new(backend);

    Ok(if settings.audit_enabled {
        controller.with_audit(audit.clone())
    } else {
        controller
    })
}
