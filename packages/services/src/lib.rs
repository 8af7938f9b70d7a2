//! # Sonasite Services
//!
//! External boundaries of the editor:
//!
//! - **Content generation**: business info → site document, with a
//!   deterministic fallback so editing can always start
//! - **Marketing**: business info + goal → ad, post and email copy
//! - **Records**: contacts and invoices, kept apart from the document
//!
//! Every boundary is an `async` trait so providers can be swapped for
//! in-process fakes.

mod business;
mod error;
pub mod generator;
pub mod marketing;
pub mod prompt;
pub mod records;
pub mod store;

pub use business::BusinessInfo;
pub use error::{GenerationError, RecordStoreError};
pub use generator::{
    fallback_document, generate_or_fallback, parse_generated_site, ContentGenerator,
    LanguageModel, ModelGenerator,
};
pub use marketing::{MarketingCampaign, MarketingGenerator};
pub use records::{ContactStatus, CrmContact, Invoice, InvoiceDraft, InvoiceItem, NewContact};
pub use store::{open_store, FileStore, MemoryStore, RecordStore, UnconfiguredStore};
