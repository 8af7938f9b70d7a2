use super::{open_session, save_session};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sonasite_editor::{Node, ThemeColors};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// Site file
    pub file: PathBuf,

    /// New primary color (#RRGGBB)
    #[arg(long)]
    pub primary: Option<String>,

    /// New secondary color (#RRGGBB)
    #[arg(long)]
    pub secondary: Option<String>,

    /// New font family
    #[arg(long)]
    pub font: Option<String>,

    /// Print derived colors as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show the theme with its derived colors, optionally updating it first
pub fn theme(args: ThemeArgs, config: &Config) -> Result<()> {
    let mut session = open_session(&args.file, config)?;

    let updates = [
        ("theme.primaryColor", args.primary),
        ("theme.secondaryColor", args.secondary),
        ("theme.fontFamily", args.font),
    ];
    for (path, value) in updates {
        if let Some(value) = value {
            session.edit_field(path, Node::from(value))?;
        }
    }
    if session.version() > 0 {
        save_session(&session, &args.file)?;
    }

    let colors = session.theme_colors();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&colors)?);
    } else {
        print_colors(&colors);
    }
    Ok(())
}

fn print_colors(colors: &ThemeColors) {
    println!("{}", "🎨 Theme".bright_blue().bold());
    println!("  primary            {}", colors.primary);
    println!("  secondary          {}", colors.secondary);
    println!("  font               {}", colors.font_family);
    println!("  text on primary    {}", colors.primary_contrast);
    println!("  accent text        {}", colors.safe_accent_text);
}
