//! Card catalog: identifiers, display records, and lookup.
//!
//! ## Key Types
//!
//! - `CardId`: Stable identifier, decimal at text boundaries
//! - `CardRecord`: Display metadata for one catalog entry
//! - `CardCatalog`: Read-only lookup seam consumed by the deck core
//! - `CardRegistry`: In-memory catalog

pub mod record;
pub mod registry;

pub use record::{CardId, CardRecord, ParseCardIdError};
pub use registry::{CardCatalog, CardRegistry};
