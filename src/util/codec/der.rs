//! A minimal subset of ASN.1 DER as needed for X.509 `SubjectPublicKeyInfo` structures.
//!
//! Only definite, minimally encoded lengths and single-byte (low-number) tags are supported.
//! Everything else is rejected on decoding.
use super::*;

pub const TAG_INTEGER: u8 = 0x02;
pub const TAG_BIT_STRING: u8 = 0x03;
pub const TAG_OID: u8 = 0x06;
pub const TAG_SEQUENCE: u8 = 0x30;

/// An object identifier given by the content octets of its DER encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Oid(pub &'static [u8]);

impl Oid {
    pub fn matches(&self, content: &[u8]) -> bool {
        self.0 == content
    }
}

/// A non-negative `INTEGER` given as big-endian magnitude.
#[derive(Clone, Copy, Debug)]
pub struct DerUint<'a>(pub &'a [u8]);

impl<'a> Encode for DerUint<'a> {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_der_uint(self.0)
    }
}

/// Bytes that are already encoded and shall be copied verbatim.
#[derive(Clone, Copy, Debug)]
pub struct Raw<'a>(pub &'a [u8]);

impl<'a> Encode for Raw<'a> {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_bytes(self.0)
    }
}

/// Wraps a structure so that it gets encoded as DER `SEQUENCE` of the inner encoding.
pub struct DerSequence<T>(pub T);

impl<T: Encode> Encode for DerSequence<T> {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_der_constructed(TAG_SEQUENCE, &self.0)
    }
}

/// DER specific encoder operations.
pub trait DerEncoder: Encoder {
    #[must_use]
    fn push_der_length(&mut self, len: usize) -> Option<()> {
        if len < 0x80 {
            self.push_u8(len as u8)
        } else {
            let bytes = (len as u64).to_be_bytes();
            let skip = bytes.iter().take_while(|b| **b == 0).count();
            self.push_u8(0x80 | (bytes.len() - skip) as u8)?;
            self.push_bytes(&bytes[skip..])
        }
    }
    #[must_use]
    fn push_der_tlv(&mut self, tag: u8, content: &[u8]) -> Option<()> {
        self.push_u8(tag)?;
        self.push_der_length(content.len())?;
        self.push_bytes(content)
    }
    /// Push a constructed value. The length is determined with a [SizeEncoder] pass first.
    #[must_use]
    fn push_der_constructed<T: Encode>(&mut self, tag: u8, x: &T) -> Option<()> {
        let mut size = SizeEncoder::new();
        x.encode(&mut size)?;
        self.push_u8(tag)?;
        self.push_der_length(size.into())?;
        x.encode(self)
    }
    /// Push a non-negative integer given as big-endian magnitude.
    #[must_use]
    fn push_der_uint(&mut self, x: &[u8]) -> Option<()> {
        let skip = x.iter().take_while(|b| **b == 0).count();
        let x = &x[skip..];
        match x.first() {
            None => self.push_der_tlv(TAG_INTEGER, &[0]),
            Some(n) if *n > 127 => {
                self.push_u8(TAG_INTEGER)?;
                self.push_der_length(x.len() + 1)?;
                self.push_u8(0)?;
                self.push_bytes(x)
            }
            Some(_) => self.push_der_tlv(TAG_INTEGER, x),
        }
    }
    #[must_use]
    fn push_der_oid(&mut self, oid: &Oid) -> Option<()> {
        self.push_der_tlv(TAG_OID, oid.0)
    }
    /// Push a bit string (without unused bits) that contains the encoding of `x`.
    #[must_use]
    fn push_der_bit_string_encoded<T: Encode>(&mut self, x: &T) -> Option<()> {
        let mut size = SizeEncoder::new();
        x.encode(&mut size)?;
        self.push_u8(TAG_BIT_STRING)?;
        self.push_der_length(usize::from(size) + 1)?;
        self.push_u8(0)?;
        x.encode(self)
    }
}

impl<E: Encoder> DerEncoder for E {}

/// DER specific decoder operations.
pub trait DerDecoder<'a>: Decoder<'a> {
    #[must_use]
    fn take_der_length(&mut self) -> Option<usize> {
        let first = self.take_u8()?;
        if first < 0x80 {
            return Some(first as usize);
        }
        let n = (first & 0x7f) as usize;
        check(n >= 1 && n <= std::mem::size_of::<usize>())?;
        let bytes = self.take_bytes(n)?;
        check(bytes[0] != 0)?;
        let len = bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize);
        check(len >= 0x80)?;
        Some(len)
    }
    /// Take a complete element with the given tag and return its content octets.
    #[must_use]
    fn take_der_tlv(&mut self, tag: u8) -> Option<&'a [u8]> {
        self.expect_u8(tag)?;
        let len = self.take_der_length()?;
        self.take_bytes(len)
    }
    /// Take a complete element of any tag and return tag and content octets.
    #[must_use]
    fn take_der_any(&mut self) -> Option<(u8, &'a [u8])> {
        let tag = self.take_u8()?;
        check(tag & 0x1f != 0x1f)?;
        let len = self.take_der_length()?;
        Some((tag, self.take_bytes(len)?))
    }
    /// Take a `SEQUENCE` and return a decoder for its content.
    #[must_use]
    fn take_der_sequence(&mut self) -> Option<RefDecoder<'a>> {
        self.take_der_tlv(TAG_SEQUENCE).map(RefDecoder::new)
    }
    /// Take a non-negative `INTEGER` and return its big-endian magnitude.
    ///
    /// Negative and non-minimal encodings are rejected.
    #[must_use]
    fn take_der_uint(&mut self) -> Option<&'a [u8]> {
        let x = self.take_der_tlv(TAG_INTEGER)?;
        let first = *x.first()?;
        check(first & 0x80 == 0)?;
        match x.get(1) {
            Some(second) if first == 0 => {
                check(second & 0x80 != 0)?;
                Some(&x[1..])
            }
            _ => Some(x),
        }
    }
    #[must_use]
    fn take_der_oid(&mut self) -> Option<&'a [u8]> {
        self.take_der_tlv(TAG_OID).filter(|x| !x.is_empty())
    }
    /// Take a bit string without unused bits and return its data octets.
    #[must_use]
    fn take_der_bit_string(&mut self) -> Option<&'a [u8]> {
        let x = self.take_der_tlv(TAG_BIT_STRING)?;
        let (unused, data) = x.split_first()?;
        check(*unused == 0)?;
        Some(data)
    }
}

impl<'a, D: Decoder<'a>> DerDecoder<'a> for D {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_01() {
        assert_eq!(Codec::encode(&DerSequence(Raw(&[]))), Ok(vec![0x30, 0]));
        let x = Codec::encode(&DerSequence(Raw(&[1; 0x80]))).unwrap();
        assert_eq!(&x[..3], &[0x30, 0x81, 0x80]);
        let x = Codec::encode(&DerSequence(Raw(&[1; 0x1234]))).unwrap();
        assert_eq!(&x[..4], &[0x30, 0x82, 0x12, 0x34]);
        assert_eq!(x.len(), 4 + 0x1234);
    }

    #[test]
    fn test_length_02() {
        let mut d = RefDecoder::new(&[0x81, 0x80]);
        assert_eq!(d.take_der_length(), Some(0x80));
        // Non-minimal forms
        assert_eq!(RefDecoder::new(&[0x81, 0x7f]).take_der_length(), None);
        assert_eq!(RefDecoder::new(&[0x82, 0x00, 0x80]).take_der_length(), None);
        // Indefinite form
        assert_eq!(RefDecoder::new(&[0x80]).take_der_length(), None);
    }

    #[test]
    fn test_uint_01() {
        assert_eq!(Codec::encode(&DerUint(&[])), Ok(vec![2, 1, 0]));
        assert_eq!(Codec::encode(&DerUint(&[0, 0, 5])), Ok(vec![2, 1, 5]));
        assert_eq!(Codec::encode(&DerUint(&[0x80])), Ok(vec![2, 2, 0, 0x80]));
        assert_eq!(Codec::encode(&DerUint(&[0x7f, 1])), Ok(vec![2, 2, 0x7f, 1]));
    }

    #[test]
    fn test_uint_02() {
        assert_eq!(RefDecoder::new(&[2, 1, 5]).take_der_uint(), Some(&[5][..]));
        assert_eq!(
            RefDecoder::new(&[2, 2, 0, 0x80]).take_der_uint(),
            Some(&[0x80][..])
        );
        assert_eq!(RefDecoder::new(&[2, 1, 0]).take_der_uint(), Some(&[0][..]));
        // Negative
        assert_eq!(RefDecoder::new(&[2, 1, 0x80]).take_der_uint(), None);
        // Non-minimal
        assert_eq!(RefDecoder::new(&[2, 2, 0, 1]).take_der_uint(), None);
        // Empty
        assert_eq!(RefDecoder::new(&[2, 0]).take_der_uint(), None);
    }

    #[test]
    fn test_bit_string_01() {
        let mut d = RefDecoder::new(&[3, 3, 0, 0xaa, 0xbb]);
        assert_eq!(d.take_der_bit_string(), Some(&[0xaa, 0xbb][..]));
        assert_eq!(RefDecoder::new(&[3, 2, 1, 0xaa]).take_der_bit_string(), None);
        assert_eq!(RefDecoder::new(&[3, 0]).take_der_bit_string(), None);
    }

    #[test]
    fn test_bit_string_02() {
        let x = Codec::encode(&BitStringOf(DerUint(&[5]))).unwrap();
        assert_eq!(x, vec![3, 4, 0, 2, 1, 5]);
    }

    struct BitStringOf<T>(T);

    impl<T: Encode> Encode for BitStringOf<T> {
        fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
            e.push_der_bit_string_encoded(&self.0)
        }
    }

    #[test]
    fn test_sequence_01() {
        let a = [0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x6e, 0x05, 0x00];
        let mut d = RefDecoder::new(&a);
        let mut s = d.take_der_sequence().unwrap();
        assert_eq!(s.take_der_oid(), Some(&[0x2b, 0x65, 0x6e][..]));
        assert_eq!(s.expect_eoi(), Some(()));
        // NULL
        assert_eq!(d.take_der_any(), Some((0x05, &[][..])));
        assert_eq!(d.expect_eoi(), Some(()));
    }

    #[test]
    fn test_any_01() {
        let a = [0x06, 0x01, 0x2a, 0x1f, 0x00];
        let mut d = RefDecoder::new(&a);
        assert_eq!(d.take_der_any(), Some((0x06, &[0x2a][..])));
        // High tag number form is not supported
        assert_eq!(d.take_der_any(), None);
    }
}
