//! Key exchange algorithms.
//!
//! Both families implement [KexAlgorithm]. The negotiator never touches family specific
//! types: it dispatches on the [CipherSuite] and hands raw bytes to [respond].
mod dh;
mod ecdh;
mod error;
mod spki;

pub use self::dh::*;
pub use self::ecdh::*;
pub use self::error::*;
pub use self::spki::*;

use super::CipherSuite;
use crate::util::secret::Secret;

/// A Diffie-Hellman style key agreement.
///
/// Public keys are exchanged as DER encoded X.509 `SubjectPublicKeyInfo`;
/// `parse_public_key` and `export_public_key` are inverse to each other.
pub trait KexAlgorithm {
    /// The cipher suite this algorithm is selected by.
    const CIPHER_SUITE: CipherSuite;

    /// Explicit parameter choice (used when there is no peer key to copy from).
    type Selector: ?Sized;
    /// Group or curve parameters.
    type Params: std::fmt::Debug + PartialEq;
    /// Parsed public key of a peer (bound to its parameters).
    type PublicKey: std::fmt::Debug;
    /// Local key pair. The private part is zeroized on drop.
    type KeyPair;

    fn parse_public_key(bytes: &[u8]) -> Result<Self::PublicKey, KexError>;
    fn export_public_key(key_pair: &Self::KeyPair) -> &[u8];

    /// Generate a key pair for explicitly selected parameters.
    fn generate_key_pair(selector: &Self::Selector) -> Result<Self::KeyPair, KexError>;
    /// Generate a key pair using exactly the parameters of the peer's key.
    fn generate_key_pair_for(peer: &Self::PublicKey) -> Result<Self::KeyPair, KexError>;

    /// Compute the shared secret. The key pair is consumed and cannot be reused.
    fn agree(key_pair: Self::KeyPair, peer: &Self::PublicKey) -> Result<Secret, KexError>;

    fn public_key_params(key: &Self::PublicKey) -> &Self::Params;
    fn key_pair_params(key_pair: &Self::KeyPair) -> &Self::Params;
}

/// Perform the responder side of one exchange.
///
/// Parses the peer's key, generates a key pair with the same parameters and agrees.
/// Returns the local public key (to be sent to the peer) and the shared secret.
pub fn respond<A: KexAlgorithm>(peer: &[u8]) -> Result<(Vec<u8>, Secret), KexError> {
    let peer = A::parse_public_key(peer)?;
    log::debug!(
        "{}: responding to peer with {:?}",
        A::CIPHER_SUITE,
        A::public_key_params(&peer)
    );
    let key_pair = A::generate_key_pair_for(&peer)?;
    let public_key = A::export_public_key(&key_pair).to_vec();
    let secret = A::agree(key_pair, &peer)?;
    Ok((public_key, secret))
}

/// Perform the initiator side of one exchange: agree with the responder's public key.
pub fn complete<A: KexAlgorithm>(key_pair: A::KeyPair, peer: &[u8]) -> Result<Secret, KexError> {
    let peer = A::parse_public_key(peer)?;
    A::agree(key_pair, &peer)
}

/// Like [respond], but dispatches on the cipher suite.
pub fn respond_with(suite: CipherSuite, peer: &[u8]) -> Result<(Vec<u8>, Secret), KexError> {
    match suite {
        CipherSuite::Dh => respond::<Dh>(peer),
        CipherSuite::Ecdh => respond::<Ecdh>(peer),
    }
}
