use crate::model::{Document, SectionId, SectionKind};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Section id generator: `<kind>-<timestamp>`.
///
/// The timestamp part strictly increases per generator, even when the clock
/// stalls or steps back, so an id handed out once is never handed out again.
#[derive(Clone)]
pub struct IdGenerator {
    last: u64,
    clock: fn() -> u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_clock(unix_millis)
    }

    /// Generator reading time from `clock`
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self { last: 0, clock }
    }

    /// Generate next id for a section of `kind`
    pub fn new_id(&mut self, kind: SectionKind) -> SectionId {
        let now = (self.clock)().max(self.last + 1);
        self.last = now;
        SectionId::new(format!("{}-{}", kind, now))
    }

    /// Next id that is not already used in `doc`
    pub fn fresh_for(&mut self, kind: SectionKind, doc: &Document) -> SectionId {
        loop {
            let id = self.new_id(kind);
            if !doc.contains(id.as_str()) {
                return id;
            }
        }
    }

    /// Last timestamp handed out
    pub fn last(&self) -> u64 {
        self.last
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator").field("last", &self.last).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, Section, Theme};

    #[test]
    fn test_ids_increase_with_stalled_clock() {
        let mut gen = IdGenerator::with_clock(|| 1_000);

        let id1 = gen.new_id(SectionKind::About);
        let id2 = gen.new_id(SectionKind::About);
        let id3 = gen.new_id(SectionKind::Gallery);

        assert_eq!(id1.as_str(), "about-1000");
        assert_eq!(id2.as_str(), "about-1001");
        assert_eq!(id3.as_str(), "gallery-1002");
    }

    #[test]
    fn test_fresh_for_skips_existing_ids() {
        let doc = Document::new("Shop", "English", Theme::default()).with_sections([
            Section::new("about-5".into(), SectionKind::About, Node::empty_map()),
            Section::new("about-6".into(), SectionKind::About, Node::empty_map()),
        ]);
        let mut gen = IdGenerator::with_clock(|| 5);

        let id = gen.fresh_for(SectionKind::About, &doc);
        assert_eq!(id.as_str(), "about-7");
    }

    #[test]
    fn test_real_clock_ids_have_kind_prefix() {
        let mut gen = IdGenerator::new();
        let id = gen.new_id(SectionKind::Services);
        assert!(id.as_str().starts_with("services-"));
    }
}
