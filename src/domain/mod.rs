//! Domain logic - pure rules independent of files and version control

pub mod category;
pub mod commit;
pub mod version;

pub use category::{categorize, strip_prefix, Category};
pub use commit::CommitRecord;
pub use version::{increment_version, Version, VersionBump};
