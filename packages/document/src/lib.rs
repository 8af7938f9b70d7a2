//! # Sonasite Document
//!
//! The structured site document and its generic mutation primitive.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ node: Map | List | Scalar tree (Arc-shared) │
//! │ path: dotted-path set/get over nodes        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ model: Document / Section / Theme           │
//! │  - typed fields at the root                 │
//! │  - canonical node view for section content  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ registry: per-kind field catalogue          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every write returns a new value. Containers not on the written path are
//! shared by `Arc` with the previous value.

pub mod content;
pub mod error;
pub mod id_generator;
pub mod model;
pub mod node;
pub mod normalize;
pub mod path;
pub mod registry;

pub use content::{CtaButton, Item, Link, SectionContent};
pub use error::PathError;
pub use id_generator::IdGenerator;
pub use model::{Document, Section, SectionId, SectionKind, Theme};
pub use node::Node;
pub use path::{get_at_path, set_at_path, Path, Segment};
pub use registry::{ContentField, FieldShape};
