//! Card reference data: static attributes by card name.
//!
//! ## Key Types
//!
//! - `CardData`: One card's static attributes (MTGJSON shape)
//! - `CardLookup`: Name lookup seam used by the statistics engine
//! - `CardRegistry`: Reference data loaded from JSON files

pub mod definition;
pub mod registry;

pub use definition::CardData;
pub use registry::{CardLookup, CardRegistry, SPLIT_SEPARATOR};
