pub mod error;
pub mod irr;
pub mod plan;

pub use error::{ComputeError, Result};
pub use plan::plan_indicators;
