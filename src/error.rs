use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Unsupported acquisition order: {0}")]
    UnsupportedAcquisitionOrder(String),

    #[error("Slice count {n_slices} is not divisible by multiband factor {factor}")]
    MultibandFactorMismatch { n_slices: usize, factor: usize },

    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
