use super::save_session;
use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use colored::Colorize;
use sonasite_editor::EditSession;
use sonasite_services::{
    generate_or_fallback, BusinessInfo, GenerationError, LanguageModel, ModelGenerator,
};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Business name
    #[arg(long)]
    pub name: String,

    /// Kind of business (bakery, dentist, ...)
    #[arg(long = "type")]
    pub business_type: String,

    /// City or area the business serves
    #[arg(long, default_value = "")]
    pub location: String,

    /// Content language (defaults to the configured language)
    #[arg(long)]
    pub language: Option<String>,

    /// File holding a model reply to build the site from
    #[arg(long)]
    pub reply: Option<PathBuf>,

    /// Site file to create
    #[arg(short, long, default_value = "site.json")]
    pub output: PathBuf,

    /// Force overwrite an existing site file
    #[arg(short, long)]
    pub force: bool,
}

/// Model that answers with the contents of a file, or fails without one
struct ReplyFile(Option<PathBuf>);

#[async_trait]
impl LanguageModel for ReplyFile {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        let Some(path) = &self.0 else {
            return Err(GenerationError::Provider(
                "no content provider configured".to_string(),
            ));
        };
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GenerationError::Provider(format!("{}: {}", path.display(), e)))
    }
}

pub async fn new_site(args: NewArgs, config: &Config) -> Result<()> {
    if args.output.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            args.output.display().to_string().as_str().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let info = BusinessInfo::new(
        args.name,
        args.business_type,
        args.location,
        args.language.unwrap_or_else(|| config.language.clone()),
    );
    println!(
        "{}",
        format!("✨ Generating a site for {}...", info.name)
            .as_str()
            .bright_blue()
            .bold()
    );

    let mut session = EditSession::new().with_history_limit(config.history_limit);
    session.begin_generation();

    let generator = ModelGenerator::new(ReplyFile(args.reply));
    let document = generate_or_fallback(&generator, &info).await;
    session.load(document);

    save_session(&session, &args.output)?;

    let document = session.document();
    println!(
        "  {} Created {} ({} sections)",
        "✓".green(),
        args.output.display(),
        document.sections.len()
    );
    for section in &document.sections {
        println!(
            "    {} {}",
            section.id().as_str().dimmed(),
            section.kind().display_name()
        );
    }

    Ok(())
}
