//! Release mechanics: classification, versioning, changelog, version artifact

pub mod bump;
pub mod changelog;
pub mod version;
pub mod version_file;
