use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the simulation core.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Rejected scenario or parameter value, reported before any state is touched.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two particles at exactly zero separation during force accumulation.
    #[error("numeric singularity: particles {i} and {j} coincide")]
    NumericSingularity { i: usize, j: usize },

    /// `step` called on an engine that was never initialized.
    #[error("call out of sequence: {0}")]
    CallOutOfSequence(&'static str),
}
