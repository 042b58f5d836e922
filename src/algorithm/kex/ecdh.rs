mod curve;

pub use self::curve::*;

use super::*;
use crate::util::codec::*;
use rand_core::OsRng;

/// Elliptic curve Diffie-Hellman on the [supported_curves].
#[derive(Debug)]
pub struct Ecdh;

/// A peer's public point (already validated by the curve backend).
#[derive(Debug, Clone)]
pub enum EcdhPublicKey {
    #[cfg(feature = "p256")]
    Secp256r1(p256::PublicKey),
    #[cfg(feature = "p384")]
    Secp384r1(p384::PublicKey),
    X25519(x25519_dalek::PublicKey),
}

impl EcdhPublicKey {
    pub fn curve(&self) -> &'static Curve {
        match self {
            #[cfg(feature = "p256")]
            Self::Secp256r1(_) => &Curve::Secp256r1,
            #[cfg(feature = "p384")]
            Self::Secp384r1(_) => &Curve::Secp384r1,
            Self::X25519(_) => &Curve::X25519,
        }
    }
}

/// An ephemeral key pair. The private scalar is zeroized by its backend on drop.
pub struct EcdhKeyPair {
    secret: EcdhSecret,
    encoded: Vec<u8>,
}

enum EcdhSecret {
    #[cfg(feature = "p256")]
    Secp256r1(p256::ecdh::EphemeralSecret),
    #[cfg(feature = "p384")]
    Secp384r1(p384::ecdh::EphemeralSecret),
    X25519(x25519_dalek::EphemeralSecret),
}

impl EcdhKeyPair {
    fn new(curve: Curve) -> Result<Self, KexError> {
        match curve {
            #[cfg(feature = "p256")]
            Curve::Secp256r1 => {
                let secret = p256::ecdh::EphemeralSecret::random(&mut OsRng);
                let point = p256::EncodedPoint::from(secret.public_key());
                Ok(Self {
                    encoded: encode_public_key(curve, point.as_bytes())?,
                    secret: EcdhSecret::Secp256r1(secret),
                })
            }
            #[cfg(feature = "p384")]
            Curve::Secp384r1 => {
                let secret = p384::ecdh::EphemeralSecret::random(&mut OsRng);
                let point = p384::EncodedPoint::from(secret.public_key());
                Ok(Self {
                    encoded: encode_public_key(curve, point.as_bytes())?,
                    secret: EcdhSecret::Secp384r1(secret),
                })
            }
            Curve::X25519 => {
                let secret = x25519_dalek::EphemeralSecret::random_from_rng(OsRng);
                let point = x25519_dalek::PublicKey::from(&secret);
                Ok(Self {
                    encoded: encode_public_key(curve, point.as_bytes())?,
                    secret: EcdhSecret::X25519(secret),
                })
            }
            #[allow(unreachable_patterns)]
            _ => Err(unsupported(curve.name())),
        }
    }

    pub fn curve(&self) -> &'static Curve {
        match self.secret {
            #[cfg(feature = "p256")]
            EcdhSecret::Secp256r1(_) => &Curve::Secp256r1,
            #[cfg(feature = "p384")]
            EcdhSecret::Secp384r1(_) => &Curve::Secp384r1,
            EcdhSecret::X25519(_) => &Curve::X25519,
        }
    }
}

impl std::fmt::Debug for EcdhKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdhKeyPair")
            .field("curve", self.curve())
            .finish_non_exhaustive()
    }
}

impl KexAlgorithm for Ecdh {
    const CIPHER_SUITE: CipherSuite = CipherSuite::Ecdh;

    type Selector = str;
    type Params = Curve;
    type PublicKey = EcdhPublicKey;
    type KeyPair = EcdhKeyPair;

    fn parse_public_key(bytes: &[u8]) -> Result<EcdhPublicKey, KexError> {
        let spki = SubjectPublicKeyInfo::parse(bytes)?;
        if OID_X25519.matches(spki.algorithm) {
            if spki.parameters.is_some() {
                return Err(KexError::Parse("unexpected X25519 parameters"));
            }
            let point: [u8; 32] = spki
                .public_key
                .try_into()
                .map_err(|_| KexError::Parse("invalid X25519 key length"))?;
            return Ok(EcdhPublicKey::X25519(point.into()));
        }
        if !OID_EC_PUBLIC_KEY.matches(spki.algorithm) {
            return Err(KexError::Parse("not an EC public key"));
        }
        let oid = match spki.parameters {
            Some((TAG_OID, oid)) => oid,
            _ => return Err(KexError::Parse("missing namedCurve parameter")),
        };
        let curve = curve::lookup_curve_oid(oid).ok_or_else(|| unsupported("unknown"))?;
        let point = spki.public_key;
        match curve {
            #[cfg(feature = "p256")]
            Curve::Secp256r1 => p256::PublicKey::from_sec1_bytes(point)
                .map(EcdhPublicKey::Secp256r1)
                .map_err(|_| KexError::Parse("invalid secp256r1 point")),
            #[cfg(feature = "p384")]
            Curve::Secp384r1 => p384::PublicKey::from_sec1_bytes(point)
                .map(EcdhPublicKey::Secp384r1)
                .map_err(|_| KexError::Parse("invalid secp384r1 point")),
            _ => Err(unsupported(curve.name())),
        }
    }

    fn export_public_key(key_pair: &EcdhKeyPair) -> &[u8] {
        &key_pair.encoded
    }

    fn generate_key_pair(name: &str) -> Result<EcdhKeyPair, KexError> {
        let curve = lookup_curve(name).ok_or_else(|| unsupported(name))?;
        EcdhKeyPair::new(curve)
    }

    fn generate_key_pair_for(peer: &EcdhPublicKey) -> Result<EcdhKeyPair, KexError> {
        EcdhKeyPair::new(*peer.curve())
    }

    fn agree(key_pair: EcdhKeyPair, peer: &EcdhPublicKey) -> Result<Secret, KexError> {
        match (key_pair.secret, peer) {
            #[cfg(feature = "p256")]
            (EcdhSecret::Secp256r1(s), EcdhPublicKey::Secp256r1(p)) => {
                Ok(Secret::new(s.diffie_hellman(p).raw_secret_bytes()))
            }
            #[cfg(feature = "p384")]
            (EcdhSecret::Secp384r1(s), EcdhPublicKey::Secp384r1(p)) => {
                Ok(Secret::new(s.diffie_hellman(p).raw_secret_bytes()))
            }
            (EcdhSecret::X25519(s), EcdhPublicKey::X25519(p)) => {
                let shared = s.diffie_hellman(p);
                if !shared.was_contributory() {
                    return Err(KexError::Agreement("low order X25519 point"));
                }
                Ok(Secret::new(shared.as_bytes()))
            }
            #[allow(unreachable_patterns)]
            _ => Err(KexError::Agreement("ECDH curve mismatch")),
        }
    }

    fn public_key_params(key: &EcdhPublicKey) -> &Curve {
        key.curve()
    }

    fn key_pair_params(key_pair: &EcdhKeyPair) -> &Curve {
        key_pair.curve()
    }
}

fn unsupported(name: &str) -> KexError {
    KexError::UnsupportedParams(format!("curve {:?}", name))
}

fn encode_public_key(curve: Curve, point: &[u8]) -> Result<Vec<u8>, KexError> {
    let public_key = Raw(point);
    let encoded = match curve {
        Curve::X25519 => Codec::encode(&SpkiEncoding {
            algorithm: OID_X25519,
            parameters: (),
            public_key,
        }),
        _ => Codec::encode(&SpkiEncoding {
            algorithm: OID_EC_PUBLIC_KEY,
            parameters: NamedCurve(curve.oid()),
            public_key,
        }),
    };
    Ok(encoded?)
}

struct NamedCurve(Oid);

impl Encode for NamedCurve {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_der_oid(&self.0)
    }
}
