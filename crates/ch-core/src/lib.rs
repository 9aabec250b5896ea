//! campus-hub/crates/ch-core/src/lib.rs
//!
//! The domain records and interface definitions shared by every campus hub crate.

pub mod models;
pub mod traits;
pub mod error;
pub mod session;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;
pub use session::*;
