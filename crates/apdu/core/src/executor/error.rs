//! Error types specific to the continuation protocol

/// Violation of the ISO 7816-4 continuation protocol by the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The card answered `6Cxx` again after the command was resent with the
    /// length it asked for
    #[error("expected length did not converge: resent with Le={requested:#04x}, card asked for {reported:#04x}")]
    UnresolvedLength {
        /// Le used for the resend
        requested: u8,
        /// Length reported by the second `6Cxx`
        reported: u8,
    },

    /// The card kept answering `61xx` past the configured chain limit
    #[error("GET RESPONSE chain limit of {0} exchanges exceeded")]
    ChainLimitExceeded(usize),
}
