//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Wrestler: a performer with promotion and faction links
//! - Promotion / Faction: affiliations a wrestler can hold
//! - EntityRef: denormalized `{id, name}` reference
//! - Association: a wrestler-to-affiliation join record

mod affiliation;
mod association;
mod reference;
mod wrestler;

pub use affiliation::*;
pub use association::*;
pub use reference::*;
pub use wrestler::*;
