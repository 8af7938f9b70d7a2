//! # Document Model
//!
//! Typed root of the site description.
//!
//! ```text
//! Document
//! ├── name, language
//! ├── theme { primaryColor, secondaryColor, fontFamily }
//! └── sections: [Section { id, kind, content, style? }]
//! ```
//!
//! Root fields are typed. Section content and style are [`Node`] trees so
//! the dotted-path writer can reach any field regardless of kind.

use crate::error::PathError;
use crate::node::Node;
use crate::path::{get_segments, set_segments, Path, Segment};
use crate::content::SectionContent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_PRIMARY_COLOR: &str = "#7c3aed";
pub const DEFAULT_SECONDARY_COLOR: &str = "#4c1d95";
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Full editable site description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(alias = "businessName")]
    pub name: String,

    pub language: String,

    #[serde(default)]
    pub theme: Theme,

    /// Render order. First is always the header, last the footer.
    #[serde(default)]
    pub sections: Vec<Arc<Section>>,
}

/// Global theme. Missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

/// Stable section identity. Never positional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Closed set of section kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Header,
    Hero,
    About,
    Services,
    Gallery,
    Testimonials,
    Contact,
    Footer,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Header,
        SectionKind::Hero,
        SectionKind::About,
        SectionKind::Services,
        SectionKind::Gallery,
        SectionKind::Testimonials,
        SectionKind::Contact,
        SectionKind::Footer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Hero => "hero",
            SectionKind::About => "about",
            SectionKind::Services => "services",
            SectionKind::Gallery => "gallery",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Contact => "contact",
            SectionKind::Footer => "footer",
        }
    }

    /// Header and footer are pinned to the ends of the page
    pub fn is_movable(self) -> bool {
        !matches!(self, SectionKind::Header | SectionKind::Footer)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown section kind: {}", s))
    }
}

/// One structural block of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,

    #[serde(alias = "type")]
    kind: SectionKind,

    #[serde(default = "Node::empty_map")]
    content: Node,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<Node>,
}

impl Section {
    pub fn new(id: SectionId, kind: SectionKind, content: Node) -> Self {
        Self {
            id,
            kind,
            content,
            style: None,
        }
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Canonical map view of the content
    pub fn content(&self) -> &Node {
        &self.content
    }

    pub fn style(&self) -> Option<&Node> {
        self.style.as_ref()
    }

    /// Typed view of the content. Keys foreign to the view are ignored.
    pub fn typed_content(&self) -> Result<SectionContent, serde_json::Error> {
        self.content.to_typed()
    }

    /// Same identity and kind, new content
    pub fn with_content(&self, content: Node) -> Self {
        Self {
            id: self.id.clone(),
            kind: self.kind,
            content,
            style: self.style.clone(),
        }
    }

    pub fn with_style(&self, style: Option<Node>) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }

    /// Same kind and content under a different identity.
    /// Only frame normalization uses this, before a document is editable.
    pub(crate) fn with_id(&self, id: SectionId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}

impl Document {
    pub fn new(name: impl Into<String>, language: impl Into<String>, theme: Theme) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            theme,
            sections: Vec::new(),
        }
    }

    pub fn with_sections<I>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = Section>,
    {
        self.sections = sections.into_iter().map(Arc::new).collect();
        self
    }

    /// Position of the section with `id`
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == *id)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.id == *id)
            .map(Arc::as_ref)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(|s| &s.id)
    }

    /// Path prefix of the section content at `index`
    pub fn content_path(index: usize) -> String {
        format!("sections.{}.content", index)
    }

    /// Canonical tree view of the whole document
    pub fn to_node(&self) -> Result<Node, serde_json::Error> {
        Node::from_typed(self)
    }

    /// Read the value at a dotted path
    pub fn get_at_path(&self, path: &str) -> Option<Node> {
        let path = Path::parse(path).ok()?;
        let segments = canonical_segments(path.segments());

        match segments.as_slice() {
            [Segment::Key(k)] if k == "name" || k == "businessName" => {
                Some(Node::from(self.name.as_str()))
            }
            [Segment::Key(k)] if k == "language" => Some(Node::from(self.language.as_str())),
            [Segment::Key(k), rest @ ..] if k == "theme" => {
                let theme = Node::from_typed(&self.theme).ok()?;
                get_segments(&theme, rest).cloned()
            }
            [Segment::Key(k), Segment::Index { index, .. }, rest @ ..] if k == "sections" => {
                let section = self.sections.get(*index)?;
                match rest {
                    [] => Node::from_typed(section.as_ref()).ok(),
                    [Segment::Key(f)] if f == "id" => Some(Node::from(section.id.as_str())),
                    [Segment::Key(f)] if f == "kind" || f == "type" => {
                        Some(Node::from(section.kind.as_str()))
                    }
                    [Segment::Key(f), rest @ ..] if f == "content" => {
                        get_segments(&section.content, rest).cloned()
                    }
                    [Segment::Key(f), rest @ ..] if f == "style" => {
                        get_segments(section.style.as_ref()?, rest).cloned()
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Return a new document with `value` stored at `path`.
    ///
    /// Root fields (`name`, `language`, `theme.*`) are typed and only accept
    /// strings. Everything below `sections.<i>.content` and
    /// `sections.<i>.style` is written through the generic path mutator.
    /// `pages.home` is accepted as an alias of `sections`.
    pub fn set_at_path(&self, path: &str, value: Node) -> Result<Document, PathError> {
        let path = Path::parse(path)?;
        let segments = canonical_segments(path.segments());

        match segments.as_slice() {
            [Segment::Key(k)] if k == "name" || k == "businessName" => Ok(Document {
                name: expect_string(&value, "name")?,
                ..self.clone()
            }),

            [Segment::Key(k)] if k == "language" => Ok(Document {
                language: expect_string(&value, "language")?,
                ..self.clone()
            }),

            [Segment::Key(k), rest @ ..] if k == "theme" => Ok(Document {
                theme: set_theme(&self.theme, rest, value)?,
                ..self.clone()
            }),

            [Segment::Key(k), rest @ ..] if k == "sections" => self.set_in_section(rest, value),

            [head, ..] => Err(PathError::UnknownField {
                field: head.to_string(),
            }),

            [] => Err(PathError::Empty),
        }
    }

    fn set_in_section(&self, segments: &[Segment], value: Node) -> Result<Document, PathError> {
        let (index, rest) = match segments {
            [] => {
                return Err(PathError::ImmutableField {
                    field: "sections".to_string(),
                })
            }
            [Segment::Index { index, .. }, rest @ ..] => (*index, rest),
            [Segment::Key(k), ..] => {
                return Err(PathError::KeyOnSequence { segment: k.clone() })
            }
        };

        let section = self.sections.get(index).ok_or(PathError::IndexOutOfRange {
            index,
            len: self.sections.len(),
        })?;

        let replaced = match rest {
            [] => {
                return Err(PathError::ImmutableField {
                    field: format!("sections.{}", index),
                })
            }
            [Segment::Key(f), ..] if f == "id" || f == "kind" || f == "type" => {
                return Err(PathError::ImmutableField { field: f.clone() })
            }
            [Segment::Key(f), rest @ ..] if f == "content" => {
                let content = set_segments(Some(&section.content), rest, value)?;
                if !matches!(content, Node::Map(_)) {
                    return Err(PathError::TypeMismatch {
                        field: "content".to_string(),
                        expected: "a mapping",
                    });
                }
                section.with_content(content)
            }
            [Segment::Key(f), rest @ ..] if f == "style" => {
                let style = set_segments(section.style.as_ref(), rest, value)?;
                section.with_style(Some(style))
            }
            [other, ..] => {
                return Err(PathError::UnknownField {
                    field: other.to_string(),
                })
            }
        };

        let mut sections = self.sections.clone();
        sections[index] = Arc::new(replaced);

        Ok(Document {
            sections,
            ..self.clone()
        })
    }
}

/// Rewrite the `pages.home` prefix to `sections`
fn canonical_segments(segments: &[Segment]) -> Vec<Segment> {
    match segments {
        [Segment::Key(pages), Segment::Key(home), rest @ ..] if pages == "pages" && home == "home" => {
            std::iter::once(Segment::Key("sections".to_string()))
                .chain(rest.iter().cloned())
                .collect()
        }
        _ => segments.to_vec(),
    }
}

fn expect_string(value: &Node, field: &str) -> Result<String, PathError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PathError::TypeMismatch {
            field: field.to_string(),
            expected: "a string",
        })
}

fn set_theme(theme: &Theme, segments: &[Segment], value: Node) -> Result<Theme, PathError> {
    match segments {
        [] => value.to_typed().map_err(|_| PathError::TypeMismatch {
            field: "theme".to_string(),
            expected: "a theme mapping",
        }),
        [Segment::Key(field)] => {
            let mut theme = theme.clone();
            let slot = match field.as_str() {
                "primaryColor" => &mut theme.primary_color,
                "secondaryColor" => &mut theme.secondary_color,
                "fontFamily" => &mut theme.font_family,
                _ => {
                    return Err(PathError::UnknownField {
                        field: format!("theme.{}", field),
                    })
                }
            };
            *slot = expect_string(&value, field)?;
            Ok(theme)
        }
        [Segment::Index { raw, .. }, ..] => Err(PathError::UnknownField {
            field: format!("theme.{}", raw),
        }),
        [Segment::Key(field), next, ..] => Err(PathError::NotAContainer {
            segment: format!("{}.{}", field, next),
        }),
    }
}
