use crate::negotiator::NegotiationError;
use std::error::Error;

/// Failure reported to the requesting client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Undecodable request or no acceptable offer.
    InvalidArgument,
    /// The negotiation did not finish within the configured timeout.
    DeadlineExceeded,
    /// The negotiation task died or the response could not be encoded.
    Internal,
}

impl Status {
    /// Human readable status text (also the `Display` output).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "Invalid argument",
            Self::DeadlineExceeded => "Deadline exceeded",
            Self::Internal => "Internal error",
        }
    }
}

impl Error for Status {}

impl From<NegotiationError> for Status {
    fn from(_: NegotiationError) -> Self {
        Self::InvalidArgument
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
