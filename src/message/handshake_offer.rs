use crate::algorithm::CipherSuite;
use crate::util::codec::*;
use std::convert::TryFrom;

/// A cipher suite paired with a public key (SPKI DER).
///
/// Sent by the client (one per offered suite, in order of preference) and by the server
/// (the selected suite and its own key).
#[derive(Clone, PartialEq, Eq)]
pub struct HandshakeOffer {
    pub cipher_suite: CipherSuite,
    pub public_key: Vec<u8>,
}

impl HandshakeOffer {
    pub fn new(cipher_suite: CipherSuite, public_key: Vec<u8>) -> Self {
        Self {
            cipher_suite,
            public_key,
        }
    }
}

impl std::fmt::Debug for HandshakeOffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandshakeOffer")
            .field("cipher_suite", &self.cipher_suite)
            .field("public_key", &crate::util::fingerprint(&self.public_key))
            .finish()
    }
}

impl Encode for HandshakeOffer {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_u32be(self.cipher_suite.number())?;
        e.push_bytes_framed(&self.public_key)
    }
}

impl Decode for HandshakeOffer {
    fn decode<'a, D: Decoder<'a>>(d: &mut D) -> Option<Self> {
        let data: HandshakeData = d.take()?;
        let cipher_suite = CipherSuite::try_from(data.cipher_suite).ok()?;
        Some(Self::new(cipher_suite, data.public_key.into()))
    }
}

/// Undecoded view of a [HandshakeOffer] as it appears on the wire.
///
/// The suite number is kept raw so that lists containing unknown suites can still be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandshakeData<'a> {
    pub cipher_suite: u32,
    pub public_key: &'a [u8],
}

impl<'a> DecodeRef<'a> for HandshakeData<'a> {
    fn decode<D: Decoder<'a>>(d: &mut D) -> Option<Self> {
        Some(Self {
            cipher_suite: d.take_u32be()?,
            public_key: d.take_bytes_framed()?,
        })
    }
}
