#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    EncodingFailed,
    DecodingFailed,
}

impl std::error::Error for CodecError {}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
