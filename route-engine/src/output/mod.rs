//! Route document model and on-disk materialization.

mod document;
mod error;
mod store;

pub use document::{OptionKind, RouteDocument, RouteOption};
pub use error::OutputError;
pub use store::OutputStore;
