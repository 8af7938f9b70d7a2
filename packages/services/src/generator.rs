//! # Content Generator Boundary
//!
//! Turns a [`BusinessInfo`] into a site [`Document`].
//!
//! The provider is any [`ContentGenerator`]. [`ModelGenerator`] adapts a
//! text-completion [`LanguageModel`]: it builds the prompt, sends it, and
//! parses the reply. [`generate_or_fallback`] is the entry point used by
//! the editor: it never fails, substituting [`fallback_document`] when the
//! provider errors or answers with something unparseable.

use crate::business::BusinessInfo;
use crate::error::GenerationError;
use crate::prompt;
use async_trait::async_trait;
use serde::Deserialize;
use sonasite_document::{Document, Node, Section, SectionKind, Theme};
use tracing::{debug, warn};

/// Text completion backend
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send `prompt`, expecting a JSON answer
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Source of generated site documents
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_site(&self, info: &BusinessInfo) -> Result<Document, GenerationError>;
}

/// Generator backed by a language model
pub struct ModelGenerator<M> {
    model: M,
}

impl<M: LanguageModel> ModelGenerator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

#[async_trait]
impl<M: LanguageModel> ContentGenerator for ModelGenerator<M> {
    async fn generate_site(&self, info: &BusinessInfo) -> Result<Document, GenerationError> {
        let reply = self.model.complete(&prompt::site_prompt(info)).await?;
        let mut document = parse_generated_site(&reply)?;

        if document.language.is_empty() {
            document.language = info.language.clone();
        }
        debug!(
            name = %document.name,
            sections = document.sections.len(),
            "Generated site document"
        );
        Ok(document)
    }
}

/// Ask `generator` for a document, falling back to [`fallback_document`]
pub async fn generate_or_fallback<G>(generator: &G, info: &BusinessInfo) -> Document
where
    G: ContentGenerator + ?Sized,
{
    match generator.generate_site(info).await {
        Ok(document) => document,
        Err(e) => {
            warn!(error = %e, business = %info.name, "Content generation failed; using fallback document");
            fallback_document(info)
        }
    }
}

/// Deterministic placeholder site for when generation fails
pub fn fallback_document(info: &BusinessInfo) -> Document {
    let header = Node::map([
        ("logoUrl", Node::from("https://picsum.photos/150/50")),
        ("navLinks", Node::list([link("Home", "#")])),
        (
            "ctaButton",
            Node::map([("text", Node::from("Contact Us")), ("url", Node::from("#"))]),
        ),
    ]);
    let hero = Node::map([
        ("title", Node::from(format!("Welcome to {}", info.name))),
        (
            "subtitle",
            Node::from("Error generating content. Please try again."),
        ),
        ("imageUrl", Node::from("https://picsum.photos/1920/1080")),
    ]);
    let contact = Node::map([
        ("title", Node::from("Contact Us")),
        (
            "text",
            Node::from("We hit a snag. Please provide your details below."),
        ),
    ]);
    let footer = Node::map([
        ("text", Node::from(format!("© {}", info.name))),
        ("links", Node::list([])),
    ]);

    Document::new(info.name.clone(), info.language.clone(), Theme::default()).with_sections([
        Section::new("header".into(), SectionKind::Header, header),
        Section::new("hero".into(), SectionKind::Hero, hero),
        Section::new("contact".into(), SectionKind::Contact, contact),
        Section::new("footer".into(), SectionKind::Footer, footer),
    ])
}

fn link(name: &str, url: &str) -> Node {
    Node::map([("name", Node::from(name)), ("url", Node::from(url))])
}

/// Shape the model answers with
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedSite {
    business_name: String,
    #[serde(default)]
    language: String,
    pages: GeneratedPages,
    #[serde(default)]
    theme: Theme,
}

#[derive(Debug, Deserialize)]
struct GeneratedPages {
    #[serde(default)]
    home: Vec<Section>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SiteReply {
    Generated(GeneratedSite),
    Document(Document),
}

/// Parse a model reply into a document.
///
/// Accepts the generator shape (`pages.home`) as well as a plain document,
/// with or without a surrounding markdown code fence.
pub fn parse_generated_site(reply: &str) -> Result<Document, GenerationError> {
    let json = strip_code_fence(reply);
    if json.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    match serde_json::from_str::<SiteReply>(json)? {
        SiteReply::Generated(site) => Ok(Document::new(site.business_name, site.language, site.theme)
            .with_sections(site.pages.home)),
        SiteReply::Document(document) => Ok(document),
    }
}

/// Remove a leading ```` ```json ```` (or bare ```` ``` ````) and a trailing fence
pub fn strip_code_fence(reply: &str) -> &str {
    let text = reply.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}
