//! Domain types: reference records, result pages, catalog releases, and
//! access-availability boundary types.

pub mod access;
pub mod biblio_ref;
pub mod hits;
pub mod release;

pub use access::{AccessClassifier, AccessOption, AccessType};
pub use biblio_ref::{BiblioRef, RawBiblioRef};
pub use hits::{EnrichedBiblioRef, RefHits, RefResult};
pub use release::{Container, ExtIds, FileEntity, FileUrl, Fileset, Release, Webcapture};
