//! # Section Registry
//!
//! Descriptive catalogue of the content fields each section kind uses.
//!
//! The registry decides which sub-editors a UI shows and what placeholder
//! content a new section gets. It is not a validator: the path writer
//! accepts any field on any kind.

use crate::content::{CtaButton, Item, Link};
use crate::model::SectionKind;
use crate::node::Node;

/// Content field known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentField {
    Title,
    Subtitle,
    Text,
    ImageUrl,
    LogoUrl,
    Items,
    Images,
    Links,
    NavLinks,
    CtaButton,
}

/// Shape of a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// Single string
    Scalar,
    /// Sequence of `{title, description, price?, imageUrl?}`
    RecordList,
    /// Sequence of strings
    StringList,
    /// Sequence of `{name, url}`
    LinkList,
    /// Single `{text, url}`
    LinkRecord,
}

impl ContentField {
    /// Key in the content map
    pub fn key(self) -> &'static str {
        match self {
            ContentField::Title => "title",
            ContentField::Subtitle => "subtitle",
            ContentField::Text => "text",
            ContentField::ImageUrl => "imageUrl",
            ContentField::LogoUrl => "logoUrl",
            ContentField::Items => "items",
            ContentField::Images => "images",
            ContentField::Links => "links",
            ContentField::NavLinks => "navLinks",
            ContentField::CtaButton => "ctaButton",
        }
    }

    pub fn shape(self) -> FieldShape {
        match self {
            ContentField::Title
            | ContentField::Subtitle
            | ContentField::Text
            | ContentField::ImageUrl
            | ContentField::LogoUrl => FieldShape::Scalar,
            ContentField::Items => FieldShape::RecordList,
            ContentField::Images => FieldShape::StringList,
            ContentField::Links | ContentField::NavLinks => FieldShape::LinkList,
            ContentField::CtaButton => FieldShape::LinkRecord,
        }
    }

    /// Non-empty value given to a freshly added section
    pub fn placeholder(self) -> Node {
        match self {
            ContentField::Title => Node::from("New Section Title"),
            ContentField::Subtitle => Node::from("Add a short subtitle here"),
            ContentField::Text => Node::from(
                "This is some default text for your new section. Click to edit!",
            ),
            ContentField::ImageUrl => Node::from("https://picsum.photos/1200/800"),
            ContentField::LogoUrl => Node::from("https://picsum.photos/150/50"),
            ContentField::Items => Node::list([record(&Item {
                title: "New Item".to_string(),
                description: "Description".to_string(),
                ..Default::default()
            })]),
            ContentField::Images => Node::list([Node::from("https://picsum.photos/800/600")]),
            ContentField::Links => Node::list([record(&Link {
                name: "Instagram".to_string(),
                url: "https://instagram.com".to_string(),
            })]),
            ContentField::NavLinks => Node::list([record(&Link {
                name: "Home".to_string(),
                url: "#".to_string(),
            })]),
            ContentField::CtaButton => record(&CtaButton {
                text: "Contact Us".to_string(),
                url: "#contact".to_string(),
            }),
        }
    }
}

// Plain structs of strings always serialize
fn record<T: serde::Serialize>(value: &T) -> Node {
    Node::from_typed(value).unwrap_or_else(|_| Node::empty_map())
}

impl SectionKind {
    /// Fields this kind is expected to use
    pub fn fields(self) -> &'static [ContentField] {
        use ContentField as F;
        match self {
            SectionKind::Header => &[F::LogoUrl, F::NavLinks, F::CtaButton],
            SectionKind::Hero => &[F::Title, F::Subtitle, F::ImageUrl, F::CtaButton],
            SectionKind::About => &[F::Title, F::Text, F::ImageUrl],
            SectionKind::Services => &[F::Title, F::Subtitle, F::Items],
            SectionKind::Gallery => &[F::Title, F::Images],
            SectionKind::Testimonials => &[F::Title, F::Items],
            SectionKind::Contact => &[F::Title, F::Text],
            SectionKind::Footer => &[F::Text, F::Links],
        }
    }

    pub fn uses(self, field: ContentField) -> bool {
        self.fields().contains(&field)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SectionKind::Header => "Header",
            SectionKind::Hero => "Hero Banner",
            SectionKind::About => "About Us",
            SectionKind::Services => "Services",
            SectionKind::Gallery => "Gallery",
            SectionKind::Testimonials => "Testimonials",
            SectionKind::Contact => "Contact Form",
            SectionKind::Footer => "Footer",
        }
    }

    /// Kinds offered by "add section"
    pub fn addable() -> impl Iterator<Item = SectionKind> {
        SectionKind::ALL.into_iter().filter(|k| k.is_movable())
    }

    /// Placeholder content containing exactly this kind's fields
    pub fn default_content(self) -> Node {
        Node::map(
            self.fields()
                .iter()
                .map(|field| (field.key(), field.placeholder())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_defaults_have_images_not_items() {
        let content = SectionKind::Gallery.default_content();
        assert!(content.get("items").is_none());
        assert_eq!(content.get("images").unwrap().as_list().unwrap().len(), 1);
        assert_eq!(content.get("title").unwrap().as_str(), Some("New Section Title"));
    }

    #[test]
    fn test_default_content_matches_field_list() {
        for kind in SectionKind::ALL {
            let content = kind.default_content();
            let keys: Vec<&str> = content.as_map().unwrap().keys().map(String::as_str).collect();
            assert_eq!(keys.len(), kind.fields().len(), "{}", kind);
            for field in kind.fields() {
                assert!(keys.contains(&field.key()), "{} missing {}", kind, field.key());
            }
        }
    }

    #[test]
    fn test_addable_excludes_frame_kinds() {
        let kinds: Vec<_> = SectionKind::addable().collect();
        assert!(!kinds.contains(&SectionKind::Header));
        assert!(!kinds.contains(&SectionKind::Footer));
        assert_eq!(kinds.len(), 6);
    }

    #[test]
    fn test_field_shapes() {
        assert_eq!(ContentField::Items.shape(), FieldShape::RecordList);
        assert_eq!(ContentField::Images.shape(), FieldShape::StringList);
        assert_eq!(ContentField::NavLinks.shape(), FieldShape::LinkList);
        assert_eq!(ContentField::CtaButton.shape(), FieldShape::LinkRecord);
        assert_eq!(ContentField::Title.shape(), FieldShape::Scalar);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(SectionKind::Hero.display_name(), "Hero Banner");
        assert_eq!(SectionKind::Contact.display_name(), "Contact Form");
    }
}
