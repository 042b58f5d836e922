//! Cipher suite negotiation and one-round DH/ECDH key agreement.
//!
//! A client sends an ordered list of [HandshakeOffer]s (cipher suite plus SPKI encoded
//! public key). The [Negotiator] answers the first offer it supports with its own public key
//! and derives the raw shared secret. Deriving session keys from it is left to the caller.
pub mod algorithm;
pub mod initiator;
pub mod message;
pub mod negotiator;
pub mod service;
pub mod util;

pub use self::algorithm::kex::{Curve, Dh, Ecdh};
pub use self::algorithm::{CipherSuite, KexAlgorithm, KexError};
pub use self::initiator::{Initiator, InitiatorConfig};
pub use self::message::{HandshakeOffer, MsgOpenConnection, MsgOpenConnectionResponse};
pub use self::negotiator::{Negotiated, NegotiationError, Negotiator, NegotiatorConfig};
pub use self::negotiator::{OfferFailurePolicy, SuitePolicy};
pub use self::service::{CryptoService, Request, ServiceConfig, ServiceHandler, Status};
pub use self::util::secret::Secret;
