use super::*;

/// Measures the encoded length of a structure without writing anything.
///
/// Fails (instead of wrapping) if the length does not fit into `usize`.
#[derive(Debug, Default)]
pub struct SizeEncoder(usize);

impl SizeEncoder {
    pub fn new() -> Self {
        Self(0)
    }

    fn add(&mut self, n: usize) -> Option<()> {
        self.0 = self.0.checked_add(n)?;
        Some(())
    }
}

impl From<SizeEncoder> for usize {
    fn from(x: SizeEncoder) -> usize {
        x.0
    }
}

impl Encoder for SizeEncoder {
    fn push_u8(&mut self, _: u8) -> Option<()> {
        self.add(1)
    }

    fn push_u32be(&mut self, _: u32) -> Option<()> {
        self.add(4)
    }

    fn push_bytes(&mut self, bytes: &[u8]) -> Option<()> {
        self.add(bytes.len())
    }
}
