pub mod identity;
pub mod timefmt;

pub use identity::format_tag_identity;
pub use timefmt::{normalize_timestamp, NormalizedTimestamp};
