/// Read side of the codec: a cursor over borrowed input.
///
/// Decoders are cheap to clone, which is how lookahead and backtracking are done. Every
/// operation returns `None` on short or unexpected input and leaves the rest to `?`.
pub trait Decoder<'a>: Clone {
    /// Succeeds iff all input has been consumed.
    #[must_use]
    fn expect_eoi(&self) -> Option<()>;
    #[must_use]
    fn expect_u8(&mut self, x: u8) -> Option<()>;
    /// Look at the next byte (e.g. a DER tag) without consuming it.
    #[must_use]
    fn peek_u8(&self) -> Option<u8>;
    #[must_use]
    fn take_u8(&mut self) -> Option<u8>;
    #[must_use]
    fn take_u32be(&mut self) -> Option<u32>;
    /// Borrow the next `len` bytes from the input.
    #[must_use]
    fn take_bytes(&mut self, len: usize) -> Option<&'a [u8]>;
}
