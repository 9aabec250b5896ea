//! # ch-view
//!
//! List and detail-panel state for the campus hub: record normalization,
//! tab filtering, the single selection slot and its comment log.
//! Everything here is synchronous and owned by the UI event loop.

pub mod normalize;
pub mod tabs;
pub mod selection;
pub mod comments;

pub use comments::CommentLog;
pub use normalize::{default_detail, Normalizer};
pub use selection::SelectionState;
pub use tabs::{filter, FilterContext, Tab};
