pub mod analyze;
pub mod serve;

pub use analyze::analyze;
pub use serve::serve;
