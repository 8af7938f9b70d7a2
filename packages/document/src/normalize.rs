//! # Frame Normalization
//!
//! Brings a document received from outside (generator output, a file) into
//! the shape the editor relies on:
//!
//! - exactly one header, first
//! - exactly one footer, last
//! - every section id present and unique
//!
//! Content is never inspected or rewritten.

use crate::id_generator::IdGenerator;
use crate::model::{Document, Section, SectionId, SectionKind};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

impl Document {
    /// True when the header/footer frame and id uniqueness already hold
    pub fn is_well_framed(&self) -> bool {
        let kinds = self.kinds();
        let headers = kinds.iter().filter(|k| **k == SectionKind::Header).count();
        let footers = kinds.iter().filter(|k| **k == SectionKind::Footer).count();

        let mut seen = HashSet::new();
        let unique_ids = self
            .ids()
            .all(|id| !id.as_str().is_empty() && seen.insert(id.as_str()));

        headers == 1
            && footers == 1
            && kinds.first() == Some(&SectionKind::Header)
            && kinds.last() == Some(&SectionKind::Footer)
            && unique_ids
    }

    /// Return a document with the header/footer frame and unique ids restored
    pub fn normalized(&self, ids: &mut IdGenerator) -> Document {
        if self.is_well_framed() {
            return self.clone();
        }

        let mut header: Option<Arc<Section>> = None;
        let mut footer: Option<Arc<Section>> = None;
        let mut body: Vec<Arc<Section>> = Vec::new();

        for section in &self.sections {
            let slot = match section.kind() {
                SectionKind::Header => &mut header,
                SectionKind::Footer => &mut footer,
                _ => {
                    body.push(section.clone());
                    continue;
                }
            };
            if slot.is_some() {
                warn!(section_id = %section.id(), kind = %section.kind(), "Dropping surplus frame section");
            } else {
                *slot = Some(section.clone());
            }
        }

        // Generated ids strictly increase, so they only need checking against
        // ids already in the incoming document
        let taken: HashSet<&str> = self.ids().map(SectionId::as_str).collect();
        let mut fresh_id = |kind: SectionKind| loop {
            let id = ids.new_id(kind);
            if !taken.contains(id.as_str()) {
                return id;
            }
        };

        let header = header.unwrap_or_else(|| {
            warn!("Document has no header; synthesizing one");
            Arc::new(Section::new(
                fresh_id(SectionKind::Header),
                SectionKind::Header,
                SectionKind::Header.default_content(),
            ))
        });
        let footer = footer.unwrap_or_else(|| {
            warn!("Document has no footer; synthesizing one");
            Arc::new(Section::new(
                fresh_id(SectionKind::Footer),
                SectionKind::Footer,
                SectionKind::Footer.default_content(),
            ))
        });

        let ordered = std::iter::once(header)
            .chain(body)
            .chain(std::iter::once(footer));

        let mut seen: HashSet<SectionId> = HashSet::new();
        let mut sections = Vec::with_capacity(self.sections.len() + 2);

        for section in ordered {
            if !section.id().as_str().is_empty() && seen.insert(section.id().clone()) {
                sections.push(section);
                continue;
            }

            let fresh = fresh_id(section.kind());
            warn!(old_id = %section.id(), new_id = %fresh, "Replacing missing or duplicate section id");
            seen.insert(fresh.clone());
            sections.push(Arc::new(section.with_id(fresh)));
        }

        Document {
            sections,
            ..self.clone()
        }
    }
}
