//! Repositories
//!
//! Entity repositories built on the store ports. Each one is generic over
//! the `RelationalStore` and `BlobStore` it is given.

mod affiliation_repository;
mod association_sync;
mod image_upload;
mod joins;
mod roster;
mod update_locks;
mod wrestler_repository;

pub use affiliation_repository::*;
pub use association_sync::AssociationSync;
pub use image_upload::upload_image;
pub use joins::AssociationRow;
pub use roster::*;
pub use wrestler_repository::*;
