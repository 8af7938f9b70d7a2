use super::{open_session, save_session};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use sonasite_editor::{Direction, EditCommand, Node, SectionId, SectionKind};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Site file
    pub file: PathBuf,

    /// Dotted path, e.g. sections.1.content.title
    pub path: String,

    /// New value; parsed as JSON when possible, otherwise taken as text
    pub value: String,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Site file
    pub file: PathBuf,

    /// Dotted path, e.g. theme.primaryColor
    pub path: String,
}

#[derive(Debug, Args)]
pub struct AddSectionArgs {
    /// Site file
    pub file: PathBuf,

    /// Section kind (hero, about, services, gallery, testimonials, contact)
    pub kind: SectionKind,
}

#[derive(Debug, Args)]
pub struct RemoveSectionArgs {
    /// Site file
    pub file: PathBuf,

    /// Section id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct MoveSectionArgs {
    /// Site file
    pub file: PathBuf,

    /// Current position of the section
    pub index: usize,

    /// up or down
    pub direction: Direction,
}

#[derive(Debug, Args)]
pub struct AddItemArgs {
    /// Site file
    pub file: PathBuf,

    /// Id of the section owning the items
    pub section_id: String,
}

#[derive(Debug, Args)]
pub struct RemoveItemArgs {
    /// Site file
    pub file: PathBuf,

    /// Id of the section owning the items
    pub section_id: String,

    /// Position of the item to remove
    pub index: usize,
}

pub fn set(args: SetArgs, config: &Config) -> Result<()> {
    let value = parse_value(&args.value);
    apply(
        &args.file,
        EditCommand::SetField {
            path: args.path,
            value,
        },
        config,
    )
}

pub fn get(args: GetArgs, config: &Config) -> Result<()> {
    let session = open_session(&args.file, config)?;
    let node = session
        .document()
        .get_at_path(&args.path)
        .ok_or_else(|| anyhow!("Nothing at path {}", args.path))?;

    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}

pub fn add_section(args: AddSectionArgs, config: &Config) -> Result<()> {
    apply(&args.file, EditCommand::AddSection { kind: args.kind }, config)
}

pub fn remove_section(args: RemoveSectionArgs, config: &Config) -> Result<()> {
    apply(
        &args.file,
        EditCommand::RemoveSection {
            id: SectionId::new(args.id),
        },
        config,
    )
}

pub fn move_section(args: MoveSectionArgs, config: &Config) -> Result<()> {
    apply(
        &args.file,
        EditCommand::MoveSection {
            index: args.index,
            direction: args.direction,
        },
        config,
    )
}

pub fn add_item(args: AddItemArgs, config: &Config) -> Result<()> {
    apply(
        &args.file,
        EditCommand::AddListItem {
            section_id: SectionId::new(args.section_id),
        },
        config,
    )
}

pub fn remove_item(args: RemoveItemArgs, config: &Config) -> Result<()> {
    apply(
        &args.file,
        EditCommand::RemoveListItem {
            section_id: SectionId::new(args.section_id),
            item_index: args.index,
        },
        config,
    )
}

/// Apply one command to a site file and save it when something changed
fn apply(file: &Path, command: EditCommand, config: &Config) -> Result<()> {
    let name = command.name();
    if !command.is_document_edit() {
        return Err(anyhow!("{} does not change a site file", name));
    }

    let mut session = open_session(file, config)?;
    session.apply(command)?;

    if session.version() == 0 {
        println!(
            "{} {} left the site unchanged",
            "⚠️".yellow(),
            name.bright_white()
        );
        return Ok(());
    }

    save_session(&session, file)?;
    println!("  {} {} → {}", "✓".green(), name, file.display());
    Ok(())
}

/// JSON when it parses, plain text otherwise
fn parse_value(raw: &str) -> Node {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(Node::from)
        .unwrap_or_else(|_| Node::from(raw))
}
