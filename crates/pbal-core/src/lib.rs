//! pbal-core: shared foundation for the process balance engine.
//!
//! Contains:
//! - units (uom SI types, constructors and unit-conversion constants)
//! - numeric (Real, tolerances and balance error helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{PbalError, PbalResult};
pub use numeric::*;
pub use units::*;
