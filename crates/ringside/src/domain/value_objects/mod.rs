//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod affiliation_kind;
mod image_path;
mod wrestler_filter;

pub use affiliation_kind::*;
pub use image_path::*;
pub use wrestler_filter::*;
