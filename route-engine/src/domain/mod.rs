//! Domain types for the transfer-route engine.
//!
//! This module contains the core domain model types that represent
//! validated transit data. Types enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod error;
mod path;
mod route;
mod stop;

pub use error::DomainError;
pub use path::{Hop, Path};
pub use route::RouteLabel;
pub use stop::{InvalidStopId, Stop, StopId, StopIdRange};
