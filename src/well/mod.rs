//! WELL Building Standard scoring - thresholds, compliance, features, roadmap

mod compliance;
mod features;
mod roadmap;
pub mod thresholds;

pub use compliance::*;
pub use features::*;
pub use roadmap::*;
pub use thresholds::*;
