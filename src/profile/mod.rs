pub mod matching;
pub mod source;
pub mod types;

pub use matching::ProfileMatcher;
pub use source::{ProfileSource, SourceError, StaticProfileSource};
pub use types::*;

// Module-level constants
pub const TARGET_LOOKUP: &str = "lookup";
