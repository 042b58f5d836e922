use super::*;

/// A cursor into an immutable buffer that implements [Decoder].
#[derive(Clone, Debug)]
pub struct RefDecoder<'a> {
    buf: &'a [u8],
}

impl<'a> RefDecoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len()
    }
}

impl<'a> Decoder<'a> for RefDecoder<'a> {
    #[inline]
    fn expect_eoi(&self) -> Option<()> {
        check(self.buf.is_empty())
    }

    #[inline]
    fn expect_u8(&mut self, x: u8) -> Option<()> {
        self.take_u8().filter(|y| *y == x).map(drop)
    }

    #[inline]
    fn peek_u8(&self) -> Option<u8> {
        self.buf.first().copied()
    }

    #[inline]
    fn take_u8(&mut self) -> Option<u8> {
        let (x, rest) = self.buf.split_first()?;
        self.buf = rest;
        Some(*x)
    }

    #[inline]
    fn take_u32be(&mut self) -> Option<u32> {
        let bytes = self.take_bytes(std::mem::size_of::<u32>())?;
        let mut x = [0; 4];
        x.copy_from_slice(bytes);
        Some(u32::from_be_bytes(x))
    }

    #[inline]
    fn take_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        check(self.buf.len() >= len)?;
        let (x, rest) = self.buf.split_at(len);
        self.buf = rest;
        Some(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_u8_01() {
        let a = [1, 2];
        let mut d = RefDecoder::new(&a);
        assert_eq!(d.peek_u8(), Some(1));
        assert_eq!(d.take_u8(), Some(1));
        assert_eq!(d.take_u8(), Some(2));
        assert_eq!(d.take_u8(), None);
        assert_eq!(d.peek_u8(), None);
    }

    #[test]
    fn test_take_u32be_01() {
        let a = [1, 2, 3, 4, 5];
        let mut d = RefDecoder::new(&a);
        assert_eq!(d.take_u32be(), Some(0x01020304));
        assert_eq!(d.take_u32be(), None);
    }

    #[test]
    fn test_take_bytes_01() {
        let a = b"ABCDE";
        let mut d = RefDecoder::new(a);
        assert_eq!(d.take_bytes(3), Some(b"ABC".as_ref()));
        assert_eq!(d.take_bytes(3), None);
        assert_eq!(d.remaining(), 2);
        assert_eq!(d.take_bytes(2), Some(b"DE".as_ref()));
        assert_eq!(d.expect_eoi(), Some(()));
    }

    #[test]
    fn test_expect_01() {
        let a = [7, 9];
        let mut d = RefDecoder::new(&a);
        assert_eq!(d.clone().expect_u8(8), None);
        assert_eq!(d.expect_u8(7), Some(()));
        assert_eq!(d.expect_eoi(), None);
        assert_eq!(d.expect_u8(9), Some(()));
        assert_eq!(d.expect_eoi(), Some(()));
    }
}
