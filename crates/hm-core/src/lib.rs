//! hm-core: stable foundation for hillforce.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{HmError, HmResult};
pub use numeric::*;
pub use units::*;
