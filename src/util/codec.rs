mod decoder;
mod der;
mod encoder;
mod error;
mod ref_decoder;
mod ref_encoder;
mod size_encoder;
mod wire;

pub use self::decoder::*;
pub use self::der::*;
pub use self::encoder::*;
pub use self::error::*;
pub use self::ref_decoder::*;
pub use self::ref_encoder::*;
pub use self::size_encoder::*;
pub use self::wire::*;

use super::check;

/// Structures that have a binary encoding (either wire framing or DER).
pub trait Encode {
    #[must_use]
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()>;
}

/// Inverse of `Encode`.
pub trait Decode: Sized {
    #[must_use]
    fn decode<'a, D: Decoder<'a>>(d: &mut D) -> Option<Self>;
}

/// Decode that allows the result to contain references into the input.
///
/// This is useful to avoid unnecessary intermediate allocations in cases where
/// the result is short-lived and can be processed while the input is still in scope.
pub trait DecodeRef<'a>: Sized {
    #[must_use]
    fn decode<D: Decoder<'a>>(d: &mut D) -> Option<Self>;
}

/// `Decode` is a stronger property than `DecodeRef` so everything that is `Decode` can
/// automatically inherit `DecodeRef`.
impl<'a, T: Decode> DecodeRef<'a> for T {
    fn decode<D: Decoder<'a>>(d: &mut D) -> Option<Self> {
        Decode::decode(d)
    }
}

impl Encode for () {
    fn encode<E: Encoder>(&self, _: &mut E) -> Option<()> {
        Some(())
    }
}

impl<T: Encode> Encode for &T {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        (*self).encode(e)
    }
}

/// Entry points for encoding into and decoding from byte buffers.
pub struct Codec;

impl Codec {
    /// Determine the encoded size of a structure without allocating.
    pub fn size<T: Encode>(x: &T) -> Result<usize, CodecError> {
        let mut e = SizeEncoder::new();
        x.encode(&mut e).ok_or(CodecError::EncodingFailed)?;
        Ok(e.into())
    }

    /// Encode a structure into a freshly allocated vector of exactly the required size.
    pub fn encode<T: Encode>(x: &T) -> Result<Vec<u8>, CodecError> {
        let size = Self::size(x)?;
        let mut vec = vec![0; size];
        let mut e = RefEncoder::new(&mut vec);
        x.encode(&mut e).ok_or(CodecError::EncodingFailed)?;
        check(e.is_full()).ok_or(CodecError::EncodingFailed)?;
        Ok(vec)
    }

    /// Decode a structure from a buffer. The input must be consumed completely.
    pub fn decode<'a, T: DecodeRef<'a>>(bytes: &'a [u8]) -> Result<T, CodecError> {
        let mut d = RefDecoder::new(bytes);
        let x = DecodeRef::decode(&mut d).ok_or(CodecError::DecodingFailed)?;
        d.expect_eoi().ok_or(CodecError::DecodingFailed)?;
        Ok(x)
    }
}
