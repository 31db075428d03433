//! Store access for the engagement engine.
//!
//! The document database is external. This module defines the read seams
//! the engine consumes and ships file-based and in-memory backends.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::{MemoryContentStore, MemoryProfileStore};
pub use traits::{ContentStore, ProfileStore};
