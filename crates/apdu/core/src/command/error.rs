//! Error types specific to APDU command framing

/// Error raised while framing a command into bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FramingError {
    /// The active length encoding cannot represent the length
    #[error("length {length} out of range for encoding (max {max})")]
    LengthOutOfRange {
        /// Length that was requested
        length: usize,
        /// Largest length the encoding supports
        max: usize,
    },
}

impl FramingError {
    /// Create a length out of range error
    pub const fn out_of_range(length: usize, max: usize) -> Self {
        Self::LengthOutOfRange { length, max }
    }
}
