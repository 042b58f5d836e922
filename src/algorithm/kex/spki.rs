//! X.509 `SubjectPublicKeyInfo` (RFC 5280, section 4.1):
//!
//! ```text
//! SubjectPublicKeyInfo ::= SEQUENCE {
//!     algorithm         AlgorithmIdentifier,
//!     subjectPublicKey  BIT STRING }
//!
//! AlgorithmIdentifier ::= SEQUENCE {
//!     algorithm         OBJECT IDENTIFIER,
//!     parameters        ANY DEFINED BY algorithm OPTIONAL }
//! ```
use super::KexError;
use crate::util::codec::*;

/// PKCS #3 `dhKeyAgreement` (1.2.840.113549.1.3.1)
pub const OID_DH_KEY_AGREEMENT: Oid = Oid(&[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x03, 0x01]);
/// ANSI X9.42 `dhpublicnumber` (1.2.840.10046.2.1)
pub const OID_DH_PUBLIC_NUMBER: Oid = Oid(&[0x2a, 0x86, 0x48, 0xce, 0x3e, 0x02, 0x01]);
/// ANSI X9.62 `id-ecPublicKey` (1.2.840.10045.2.1)
pub const OID_EC_PUBLIC_KEY: Oid = Oid(&[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01]);
/// RFC 8410 `id-X25519` (1.3.101.110)
pub const OID_X25519: Oid = Oid(&[0x2b, 0x65, 0x6e]);

/// Decoded view into an encoded `SubjectPublicKeyInfo`.
#[derive(Debug, Clone, Copy)]
pub struct SubjectPublicKeyInfo<'a> {
    /// Content octets of the algorithm OID.
    pub algorithm: &'a [u8],
    /// Tag and content octets of the algorithm parameters (if present).
    pub parameters: Option<(u8, &'a [u8])>,
    /// Data octets of the `subjectPublicKey` bit string.
    pub public_key: &'a [u8],
}

impl<'a> SubjectPublicKeyInfo<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self, KexError> {
        Codec::decode(bytes).map_err(|_| KexError::Parse("malformed SubjectPublicKeyInfo"))
    }
}

impl<'a> DecodeRef<'a> for SubjectPublicKeyInfo<'a> {
    fn decode<D: Decoder<'a>>(d: &mut D) -> Option<Self> {
        let mut spki = d.take_der_sequence()?;
        let mut alg = spki.take_der_sequence()?;
        let algorithm = alg.take_der_oid()?;
        let parameters = match alg.expect_eoi() {
            Some(()) => None,
            None => Some(alg.take_der_any()?),
        };
        alg.expect_eoi()?;
        let public_key = spki.take_der_bit_string()?;
        spki.expect_eoi()?;
        Some(Self {
            algorithm,
            parameters,
            public_key,
        })
    }
}

/// Encoder side of `SubjectPublicKeyInfo`.
///
/// `P` encodes the complete parameters element (or nothing) and `K` the content of the
/// `subjectPublicKey` bit string.
#[derive(Debug)]
pub struct SpkiEncoding<P, K> {
    pub algorithm: Oid,
    pub parameters: P,
    pub public_key: K,
}

impl<P: Encode, K: Encode> Encode for SpkiEncoding<P, K> {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_der_constructed(TAG_SEQUENCE, &SpkiContent(self))
    }
}

struct SpkiContent<'s, P, K>(&'s SpkiEncoding<P, K>);

impl<'s, P: Encode, K: Encode> Encode for SpkiContent<'s, P, K> {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_der_constructed(TAG_SEQUENCE, &AlgorithmIdentifier(self.0))?;
        e.push_der_bit_string_encoded(&self.0.public_key)
    }
}

struct AlgorithmIdentifier<'s, P, K>(&'s SpkiEncoding<P, K>);

impl<'s, P: Encode, K: Encode> Encode for AlgorithmIdentifier<'s, P, K> {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_der_oid(&self.0.algorithm)?;
        self.0.parameters.encode(e)
    }
}
