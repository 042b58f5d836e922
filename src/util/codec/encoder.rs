/// Write side of the codec.
///
/// Every [Encode](super::Encode) implementation is run twice: once against a
/// [SizeEncoder](super::SizeEncoder) to learn the exact output length (DER needs it for
/// nested lengths, too) and once against a [RefEncoder](super::RefEncoder) that fills the
/// buffer. An operation returns `None` when the output would not fit.
pub trait Encoder: Sized {
    #[must_use]
    fn push_u8(&mut self, x: u8) -> Option<()>;
    /// Big-endian, as used for all integers of the message framing.
    #[must_use]
    fn push_u32be(&mut self, x: u32) -> Option<()>;
    #[must_use]
    fn push_bytes(&mut self, x: &[u8]) -> Option<()>;
}
