/// Errors raised while building or reading the in-memory data model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    /// A raw record was missing a required field or held an unusable value.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Positional access past the end of a sequence.
    #[error("index {index} out of range for collection of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

impl DataError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}
