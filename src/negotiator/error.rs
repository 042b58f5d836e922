use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationError {
    /// None of the offers names an enabled cipher suite with a usable public key.
    NoSupportedSuite,
}

impl Error for NegotiationError {}

impl std::fmt::Display for NegotiationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSupportedSuite => write!(f, "No supported cipher suite offered"),
        }
    }
}
