//! # lectio-slug
//!
//! Resource identity and slug-based URL resolution for the lectio content
//! platform.
//!
//! ## Design Principles
//!
//! - Identifiers are stable and system-generated; slugs are display-only,
//!   recomputed from the current title on every render and never stored
//! - The trailing identifier is the only load-bearing part of a resource URL,
//!   so title edits never break existing links
//! - Extraction is total: every URL segment ever produced by a historical
//!   composition scheme resolves to some identifier string; whether that
//!   identifier exists is the storage layer's question, not ours
//!
//! ## URL Format
//!
//! Resource URLs combine a derived slug with the resource's routing key:
//!
//! ```text
//! /{collection}/{slug}-{identifier}
//! ```
//!
//! Examples:
//! - `/lessons/uvod-do-historie-k5b8x2p9m1` (short code)
//! - `/lessons/uvod-38e4b033-467d-4ff9-a28e-d4aadb512f40` (resource id)
//! - `/lessons/k5b8x2p9m1` (bare identifier, no slug)
//!
//! The identifier is the resource's [`ShortCode`] when one was assigned at
//! creation, otherwise its [`ResourceId`]. Three historical suffix formats
//! (short code, UUID, legacy numeric id) are recognized on the way back in,
//! in that priority order.

mod error;
mod slug;
mod store;
mod types;
mod url;

pub use error::{IdError, StoreError};
pub use slug::slugify;
pub use store::{
    create_resource, resolve, MemoryStore, ResourceStore, StoredResource,
    MAX_SHORT_CODE_ATTEMPTS,
};
pub use types::{ResourceId, ResourceKeys, ShortCode};
pub use url::{compose_path, extract_identifier, ExtractedIdentifier, IdentifierKind};

/// Re-export uuid for consumers that need raw UUID operations
pub use uuid::Uuid;
