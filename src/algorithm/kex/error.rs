use crate::util::codec::CodecError;

/// Failure of a single key exchange step.
///
/// None of these is fatal: the negotiator treats them as "this offer is unusable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KexError {
    /// Malformed public key encoding or a key of another algorithm family.
    Parse(&'static str),
    /// Requested key size or curve (or the peer's parameters) are not supported.
    UnsupportedParams(String),
    /// Parameter mismatch or a peer key rejected by the primitive.
    Agreement(&'static str),
    /// A structure could not be encoded.
    Encoding,
}

impl std::error::Error for KexError {}

impl From<CodecError> for KexError {
    fn from(_: CodecError) -> Self {
        Self::Encoding
    }
}

impl std::fmt::Display for KexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Invalid public key: {}", e),
            Self::UnsupportedParams(e) => write!(f, "Unsupported parameters: {}", e),
            Self::Agreement(e) => write!(f, "Key agreement failed: {}", e),
            Self::Encoding => write!(f, "Encoding failed"),
        }
    }
}
