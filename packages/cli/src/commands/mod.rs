pub mod edit;
pub mod new;
pub mod records;
pub mod theme;

pub use edit::{
    add_item, add_section, get, move_section, remove_item, remove_section, set, AddItemArgs,
    AddSectionArgs, GetArgs, MoveSectionArgs, RemoveItemArgs, RemoveSectionArgs, SetArgs,
};
pub use new::{new_site, NewArgs};
pub use records::{contacts, invoices, ContactsArgs, InvoicesArgs};
pub use theme::{theme, ThemeArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use sonasite_editor::EditSession;
use std::fs;
use std::path::Path;

/// Load a site file into a fresh session
pub(crate) fn open_session(file: &Path, config: &Config) -> Result<EditSession> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Cannot read site file {}", file.display()))?;

    let mut session = EditSession::new().with_history_limit(config.history_limit);
    session
        .load_json(&text)
        .with_context(|| format!("{} is not a site document", file.display()))?;
    Ok(session)
}

/// Write the session's current document back to `file`
pub(crate) fn save_session(session: &EditSession, file: &Path) -> Result<()> {
    fs::write(file, session.to_json()?)
        .with_context(|| format!("Cannot write site file {}", file.display()))
}
