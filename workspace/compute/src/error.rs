use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The iterative rate solver did not converge
    #[error("Convergence error: {0}")]
    Convergence(String),

    /// The cash flow series cannot have a meaningful rate of return
    #[error("Invalid cash flows: {0}")]
    InvalidFlows(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
