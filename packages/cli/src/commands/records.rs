use crate::config::Config;
use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use colored::Colorize;
use sonasite_services::{
    open_store, ContactStatus, InvoiceDraft, InvoiceItem, NewContact, RecordStore,
    RecordStoreError,
};
use std::path::Path;

#[derive(Debug, Args)]
pub struct ContactsArgs {
    #[command(subcommand)]
    pub command: ContactsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// List contacts, newest first
    List,

    /// Add a contact
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Lead, Contacted, Customer or Lost
        #[arg(long, default_value = "Lead")]
        status: ContactStatus,
    },
}

#[derive(Debug, Args)]
pub struct InvoicesArgs {
    #[command(subcommand)]
    pub command: InvoicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InvoicesCommand {
    /// List invoices, newest first
    List,

    /// Issue an invoice dated today
    Add {
        /// Customer name
        #[arg(long)]
        customer: String,

        /// Customer email
        #[arg(long)]
        email: String,

        /// Line item as description:quantity:price (repeatable)
        #[arg(long = "item", value_parser = parse_item)]
        items: Vec<InvoiceItem>,
    },
}

pub async fn contacts(args: ContactsArgs, config: &Config, cwd: &Path) -> Result<()> {
    let store = open_store(config.record_store_path(cwd));
    let result = match args.command {
        ContactsCommand::List => list_contacts(store.as_ref()).await,
        ContactsCommand::Add {
            name,
            email,
            status,
        } => {
            let contact = store
                .add_contact(NewContact::new(name, email, status))
                .await;
            contact.map(|contact| {
                println!(
                    "  {} Added contact #{} {}",
                    "✓".green(),
                    contact.id,
                    contact.name
                );
            })
        }
    };
    report_unavailable(result)
}

pub async fn invoices(args: InvoicesArgs, config: &Config, cwd: &Path) -> Result<()> {
    let store = open_store(config.record_store_path(cwd));
    let result = match args.command {
        InvoicesCommand::List => list_invoices(store.as_ref()).await,
        InvoicesCommand::Add {
            customer,
            email,
            items,
        } => {
            if items.is_empty() {
                return Err(anyhow!("An invoice needs at least one --item"));
            }
            let invoice = InvoiceDraft {
                customer_name: customer,
                customer_email: email,
                items,
            }
            .issue(Utc::now());

            store.add_invoice(invoice).await.map(|invoice| {
                println!(
                    "  {} Issued {} for {:.2} (due {})",
                    "✓".green(),
                    invoice.id,
                    invoice.total,
                    invoice.due_date
                );
            })
        }
    };
    report_unavailable(result)
}

async fn list_contacts(store: &dyn RecordStore) -> Result<(), RecordStoreError> {
    let contacts = store.contacts().await?;
    if contacts.is_empty() {
        println!("No contacts yet");
    }
    for contact in contacts {
        println!(
            "  #{:<4} {:<24} {:<28} {:<10} {}",
            contact.id, contact.name, contact.email, contact.status, contact.last_contacted
        );
    }
    Ok(())
}

async fn list_invoices(store: &dyn RecordStore) -> Result<(), RecordStoreError> {
    let invoices = store.invoices().await?;
    if invoices.is_empty() {
        println!("No invoices yet");
    }
    for invoice in invoices {
        println!(
            "  {:<18} {:<24} {:>10.2}  issued {}  due {}",
            invoice.id, invoice.customer_name, invoice.total, invoice.issue_date, invoice.due_date
        );
    }
    Ok(())
}

/// An unconfigured backend is reported, not fatal
fn report_unavailable(result: Result<(), RecordStoreError>) -> Result<()> {
    match result {
        Err(RecordStoreError::Unavailable(message)) => {
            println!("{} {}", "⚠️".yellow(), message);
            Ok(())
        }
        other => Ok(other?),
    }
}

fn parse_item(raw: &str) -> Result<InvoiceItem, String> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(price), Some(quantity), Some(description)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("Expected description:quantity:price, got {:?}", raw));
    };

    Ok(InvoiceItem {
        description: description.to_string(),
        quantity: quantity
            .trim()
            .parse()
            .map_err(|_| format!("Invalid quantity {:?}", quantity))?,
        price: price
            .trim()
            .parse()
            .map_err(|_| format!("Invalid price {:?}", price))?,
    })
}
