pub mod heuristics;
pub mod ordering;

pub use heuristics::{NameRules, TileMetadata};
pub use ordering::CanonicalOrder;
