//! Domain logic - pure release rules independent of git and project files

pub mod classify;
pub mod environment;
pub mod policy;
pub mod tag;
pub mod version;

pub use classify::VersionClassifier;
pub use environment::{Environment, DEVELOPMENT_TAG_PREFIX};
pub use policy::{bump, externalize, resolve_current, VersionPair};
pub use tag::TagLineParser;
pub use version::{IncrementKind, SemanticVersion, FLOOR_VERSION};
