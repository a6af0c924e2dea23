//! Analysis module - statistics, aggregation, pattern detection

mod aggregation;
mod patterns;

pub use aggregation::*;
pub use patterns::*;
