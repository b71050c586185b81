use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Reading session state before any layout pass ran is a programmer
    /// error and is surfaced immediately instead of degrading to empty
    /// output like the not-ready cases do.
    #[error("chart layout has not been computed yet")]
    LayoutNotComputed,
}
