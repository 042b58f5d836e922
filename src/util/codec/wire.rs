use super::*;

/// Encoder operations for the length-prefixed message framing.
pub trait WireEncoder: Encoder {
    #[must_use]
    #[inline]
    fn push<T: Encode>(&mut self, x: &T) -> Option<()> {
        x.encode(self)
    }
    #[must_use]
    #[inline]
    fn push_usize(&mut self, x: usize) -> Option<()> {
        check(x <= u32::MAX as usize)?;
        self.push_u32be(x as u32)
    }
    #[must_use]
    #[inline]
    fn push_bytes_framed(&mut self, x: &[u8]) -> Option<()> {
        self.push_usize(x.len())?;
        self.push_bytes(x)
    }
    /// A list is encoded as number of elements followed by the elements.
    #[must_use]
    fn push_list<T: Encode>(&mut self, xs: &[T]) -> Option<()> {
        self.push_usize(xs.len())?;
        for x in xs {
            self.push(x)?
        }
        Some(())
    }
}

impl<E: Encoder> WireEncoder for E {}

/// Decoder operations for the length-prefixed message framing.
pub trait WireDecoder<'a>: Decoder<'a> {
    #[must_use]
    fn take<T: DecodeRef<'a>>(&mut self) -> Option<T> {
        T::decode(self)
    }
    #[must_use]
    fn take_usize(&mut self) -> Option<usize> {
        // This is safe on all platforms where usize is at least 32 bits.
        Some(self.take_u32be()? as usize)
    }
    #[must_use]
    fn take_bytes_framed(&mut self) -> Option<&'a [u8]> {
        let len = self.take_usize()?;
        self.take_bytes(len)
    }
    #[must_use]
    fn take_list<T: DecodeRef<'a>>(&mut self) -> Option<Vec<T>> {
        let len = self.take_usize()?;
        // NB: Don't use `with_capacity` here as it might
        // lead to remote triggered resource exhaustion.
        let mut v = Vec::new();
        for _ in 0..len {
            v.push(self.take()?);
        }
        Some(v)
    }
}

impl<'a, D: Decoder<'a>> WireDecoder<'a> for D {}
