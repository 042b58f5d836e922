mod group;

pub use self::group::*;

use super::*;
use crate::util::codec::*;
use num_bigint::BigUint;
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

/// Smallest modulus accepted from a peer.
const DH_MIN_BITS: u64 = 512;
/// Largest modulus accepted from a peer.
const DH_MAX_BITS: u64 = 8192;
/// Smallest subgroup order accepted from a peer (X9.42 minimum).
const DH_MIN_SUBGROUP_BITS: u64 = 160;

/// Finite field Diffie-Hellman.
#[derive(Debug)]
pub struct Dh;

/// Domain parameters: prime modulus `p`, generator `g` and (optionally) the order `q` of the
/// subgroup generated by `g`.
#[derive(Clone, PartialEq, Eq)]
pub struct DhParams {
    p: BigUint,
    g: BigUint,
    q: Option<BigUint>,
}

impl DhParams {
    /// Construct parameters without any validation.
    pub fn from_parts(p: BigUint, g: BigUint, q: Option<BigUint>) -> Self {
        Self { p, g, q }
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    pub fn q(&self) -> Option<&BigUint> {
        self.q.as_ref()
    }

    /// Size of the modulus in bits.
    pub fn bits(&self) -> u64 {
        self.p.bits()
    }

    /// Byte length of the modulus (and of the shared secret).
    fn len(&self) -> usize {
        ((self.p.bits() + 7) / 8) as usize
    }

    /// Sanity checks applied to parameters copied from a peer.
    ///
    /// This does not test primality (too expensive per handshake); a composite modulus
    /// only hurts the peer that chose it.
    fn validate(&self) -> Result<(), KexError> {
        let bits = self.bits();
        if bits < DH_MIN_BITS || bits > DH_MAX_BITS {
            return Err(KexError::UnsupportedParams(format!(
                "DH modulus of {} bits",
                bits
            )));
        }
        if !self.p.bit(0) {
            return Err(KexError::UnsupportedParams("even DH modulus".into()));
        }
        let one = BigUint::from(1u32);
        let p1 = &self.p - 1u32;
        if self.g <= one || self.g >= p1 {
            return Err(KexError::UnsupportedParams("DH generator out of range".into()));
        }
        if let Some(q) = &self.q {
            if q.bits() < DH_MIN_SUBGROUP_BITS || q >= &self.p {
                return Err(KexError::UnsupportedParams(format!(
                    "DH subgroup order of {} bits",
                    q.bits()
                )));
            }
            if (&p1 % q) != BigUint::from(0u32) {
                return Err(KexError::UnsupportedParams(
                    "DH subgroup order does not divide p-1".into(),
                ));
            }
        }
        Ok(())
    }

    /// Draw a private exponent: `[1, q-1]` if the subgroup order is known, `[2, p-2]` otherwise.
    fn random_exponent(&self) -> BigUint {
        match &self.q {
            Some(q) => random_below(&(q - 1u32)) + 1u32,
            None => random_below(&(&self.p - 3u32)) + 2u32,
        }
    }

    /// Check `1 < y < p-1` and (if `q` is known) `y^q = 1 mod p`.
    fn check_public_value(&self, y: &BigUint) -> Result<(), KexError> {
        let one = BigUint::from(1u32);
        if y <= &one || y >= &(&self.p - 1u32) {
            return Err(KexError::Agreement("DH public value out of range"));
        }
        if let Some(q) = &self.q {
            if y.modpow(q, &self.p) != one {
                return Err(KexError::Agreement("DH public value not in subgroup"));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for DhParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DhParams")
            .field("bits", &self.bits())
            .field("g", &self.g)
            .field("q", &self.q.is_some())
            .finish()
    }
}

/// A uniformly distributed number in `[0, n)` (`n` must be non-zero).
///
/// 64 surplus random bits make the modulo bias negligible.
fn random_below(n: &BigUint) -> BigUint {
    let len = ((n.bits() + 7) / 8 + 8) as usize;
    let mut buf = Zeroizing::new(vec![0u8; len]);
    OsRng.fill_bytes(&mut buf);
    BigUint::from_bytes_be(&buf) % n
}

/// Parsed public key of a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhPublicKey {
    params: DhParams,
    y: BigUint,
}

impl DhPublicKey {
    pub fn params(&self) -> &DhParams {
        &self.params
    }

    /// The public value `y = g^x mod p`.
    pub fn value(&self) -> &BigUint {
        &self.y
    }
}

/// Local key pair. The private exponent is only kept as zeroizing byte buffer.
///
/// `modpow` needs the exponent as `BigUint`; those short-lived copies are not wiped on drop
/// as num-bigint offers no way to do so. They are dropped right after each exponentiation.
pub struct DhKeyPair {
    params: DhParams,
    x: Zeroizing<Vec<u8>>,
    encoded: Vec<u8>,
}

impl DhKeyPair {
    fn new(params: DhParams) -> Result<Self, KexError> {
        let (x, y) = {
            let x = params.random_exponent();
            let y = params.g.modpow(&x, &params.p);
            (Zeroizing::new(x.to_bytes_be()), y)
        };
        let encoded = Codec::encode(&DhSpki {
            params: &params,
            y: &y,
        })?;
        Ok(Self {
            params,
            x,
            encoded,
        })
    }
}

impl std::fmt::Debug for DhKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DhKeyPair")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl KexAlgorithm for Dh {
    const CIPHER_SUITE: CipherSuite = CipherSuite::Dh;

    /// Modulus size in bits (one of [DH_KEY_SIZES]).
    type Selector = usize;
    type Params = DhParams;
    type PublicKey = DhPublicKey;
    type KeyPair = DhKeyPair;

    fn parse_public_key(bytes: &[u8]) -> Result<DhPublicKey, KexError> {
        let spki = SubjectPublicKeyInfo::parse(bytes)?;
        let params = match spki.parameters {
            Some((TAG_SEQUENCE, params)) => params,
            _ => return Err(KexError::Parse("missing DH parameters")),
        };
        let mut d = RefDecoder::new(params);
        let params = if OID_DH_KEY_AGREEMENT.matches(spki.algorithm) {
            decode_pkcs3_params(&mut d)
        } else if OID_DH_PUBLIC_NUMBER.matches(spki.algorithm) {
            decode_x942_params(&mut d)
        } else {
            return Err(KexError::Parse("not a DH key"));
        };
        let params = params.ok_or(KexError::Parse("malformed DH parameters"))?;
        let mut d = RefDecoder::new(spki.public_key);
        let y = d.take_der_uint();
        let y = y
            .filter(|_| d.expect_eoi().is_some())
            .ok_or(KexError::Parse("malformed DH public value"))?;
        Ok(DhPublicKey {
            params,
            y: BigUint::from_bytes_be(y),
        })
    }

    fn export_public_key(key_pair: &DhKeyPair) -> &[u8] {
        &key_pair.encoded
    }

    fn generate_key_pair(key_size: &usize) -> Result<DhKeyPair, KexError> {
        let params = dh_group(*key_size).ok_or_else(|| {
            KexError::UnsupportedParams(format!("DH key size {}", key_size))
        })?;
        DhKeyPair::new(params)
    }

    fn generate_key_pair_for(peer: &DhPublicKey) -> Result<DhKeyPair, KexError> {
        peer.params.validate()?;
        DhKeyPair::new(peer.params.clone())
    }

    fn agree(key_pair: DhKeyPair, peer: &DhPublicKey) -> Result<Secret, KexError> {
        let params = &key_pair.params;
        if params != &peer.params {
            return Err(KexError::Agreement("DH parameter mismatch"));
        }
        params.check_public_value(&peer.y)?;
        let z = peer.y.modpow(&BigUint::from_bytes_be(&key_pair.x), &params.p);
        if z <= BigUint::from(1u32) {
            return Err(KexError::Agreement("degenerate DH shared secret"));
        }
        // Left-pad to the length of the modulus
        let z = Zeroizing::new(z.to_bytes_be());
        let mut secret = vec![0u8; params.len()];
        secret[params.len() - z.len()..].copy_from_slice(&z);
        Ok(Secret::from(secret))
    }

    fn public_key_params(key: &DhPublicKey) -> &DhParams {
        &key.params
    }

    fn key_pair_params(key_pair: &DhKeyPair) -> &DhParams {
        &key_pair.params
    }
}

/// PKCS #3: `DHParameter ::= SEQUENCE { prime INTEGER, base INTEGER,
/// privateValueLength INTEGER OPTIONAL }`
fn decode_pkcs3_params<'a, D: Decoder<'a>>(d: &mut D) -> Option<DhParams> {
    let p = d.take_der_uint()?;
    let g = d.take_der_uint()?;
    if d.expect_eoi().is_none() {
        // The private value length is a hint for the key owner only.
        d.take_der_uint()?;
        d.expect_eoi()?;
    }
    Some(DhParams::from_parts(
        BigUint::from_bytes_be(p),
        BigUint::from_bytes_be(g),
        None,
    ))
}

/// X9.42: `DomainParameters ::= SEQUENCE { p INTEGER, g INTEGER, q INTEGER,
/// j INTEGER OPTIONAL, validationParms ValidationParms OPTIONAL }`
fn decode_x942_params<'a, D: Decoder<'a>>(d: &mut D) -> Option<DhParams> {
    let p = d.take_der_uint()?;
    let g = d.take_der_uint()?;
    let q = d.take_der_uint()?;
    if d.peek_u8() == Some(TAG_INTEGER) {
        d.take_der_uint()?;
    }
    if d.peek_u8() == Some(TAG_SEQUENCE) {
        d.take_der_sequence()?;
    }
    d.expect_eoi()?;
    Some(DhParams::from_parts(
        BigUint::from_bytes_be(p),
        BigUint::from_bytes_be(g),
        Some(BigUint::from_bytes_be(q)),
    ))
}

/// `SubjectPublicKeyInfo` of a DH public value. Uses the X9.42 form iff `q` is known.
struct DhSpki<'a> {
    params: &'a DhParams,
    y: &'a BigUint,
}

impl<'a> Encode for DhSpki<'a> {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        let algorithm = match self.params.q {
            Some(_) => OID_DH_PUBLIC_NUMBER,
            None => OID_DH_KEY_AGREEMENT,
        };
        let y = self.y.to_bytes_be();
        let spki = SpkiEncoding {
            algorithm,
            parameters: DerSequence(DhParamsContent(self.params)),
            public_key: DerUint(&y),
        };
        spki.encode(e)
    }
}

struct DhParamsContent<'a>(&'a DhParams);

impl<'a> Encode for DhParamsContent<'a> {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_der_uint(&self.0.p.to_bytes_be())?;
        e.push_der_uint(&self.0.g.to_bytes_be())?;
        if let Some(q) = &self.0.q {
            e.push_der_uint(&q.to_bytes_be())?;
        }
        Some(())
    }
}
