mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add_item, add_section, contacts, get, invoices, move_section, new_site, remove_item,
    remove_section, set, theme, AddItemArgs, AddSectionArgs, ContactsArgs, GetArgs, InvoicesArgs,
    MoveSectionArgs, NewArgs, RemoveItemArgs, RemoveSectionArgs, SetArgs, ThemeArgs,
};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Sonasite CLI - generate and edit small-business websites
#[derive(Parser, Debug)]
#[command(name = "sonasite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a site file for a business
    New(NewArgs),

    /// Set the value at a dotted path
    Set(SetArgs),

    /// Print the value at a dotted path
    Get(GetArgs),

    /// Add a section before the footer
    AddSection(AddSectionArgs),

    /// Remove a section by id
    RemoveSection(RemoveSectionArgs),

    /// Swap a section with its neighbour
    MoveSection(MoveSectionArgs),

    /// Append a placeholder item to a section's items
    AddItem(AddItemArgs),

    /// Remove an item from a section's items
    RemoveItem(RemoveItemArgs),

    /// Show or change the theme
    Theme(ThemeArgs),

    /// Manage CRM contacts
    Contacts(ContactsArgs),

    /// Manage invoices
    Invoices(InvoicesArgs),
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd)?;
    init_tracing(&config);

    match cli.command {
        Command::New(args) => new_site(args, &config).await,
        Command::Set(args) => set(args, &config),
        Command::Get(args) => get(args, &config),
        Command::AddSection(args) => add_section(args, &config),
        Command::RemoveSection(args) => remove_section(args, &config),
        Command::MoveSection(args) => move_section(args, &config),
        Command::AddItem(args) => add_item(args, &config),
        Command::RemoveItem(args) => remove_item(args, &config),
        Command::Theme(args) => theme(args, &config),
        Command::Contacts(args) => contacts(args, &config, &cwd).await,
        Command::Invoices(args) => invoices(args, &config, &cwd).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
