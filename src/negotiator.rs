//! Server side cipher suite negotiation.
//!
//! The client sends one [HandshakeOffer] per cipher suite it is willing to use, in order of
//! preference. The server walks this list and performs the key exchange for the first offer
//! it supports and can use. Each negotiation is a single attempt without retries.
mod config;
mod error;
mod policy;

pub use self::config::*;
pub use self::error::*;
pub use self::policy::*;

use crate::algorithm::kex::respond_with;
use crate::algorithm::CipherSuite;
use crate::message::HandshakeOffer;
use crate::util::fingerprint;
use crate::util::secret::Secret;

/// Outcome of a successful negotiation.
///
/// Only `cipher_suite` and `public_key` are meant for the peer (see [Negotiated::response]).
#[derive(Debug)]
pub struct Negotiated {
    pub cipher_suite: CipherSuite,
    /// The server's public key (SPKI DER).
    pub public_key: Vec<u8>,
    pub shared_secret: Secret,
}

impl Negotiated {
    /// The offer to send back to the client.
    pub fn response(&self) -> HandshakeOffer {
        HandshakeOffer::new(self.cipher_suite, self.public_key.clone())
    }
}

/// Stateless negotiator; a single instance may serve any number of concurrent requests.
pub struct Negotiator {
    policy: Box<dyn SuitePolicy>,
    offer_failure_policy: OfferFailurePolicy,
}

impl Negotiator {
    pub fn new(config: &NegotiatorConfig) -> Self {
        let policy = AllowedSuites(config.cipher_suites.clone());
        Self::with_policy(policy, config.offer_failure_policy)
    }

    pub fn with_policy<P: SuitePolicy + 'static>(
        policy: P,
        offer_failure_policy: OfferFailurePolicy,
    ) -> Self {
        Self {
            policy: Box::new(policy),
            offer_failure_policy,
        }
    }

    /// Select the first usable offer and perform the key exchange for it.
    pub fn negotiate(&self, offers: &[HandshakeOffer]) -> Result<Negotiated, NegotiationError> {
        for (i, offer) in offers.iter().enumerate() {
            let suite = offer.cipher_suite;
            if !self.policy.is_supported(suite) {
                log::debug!("Offer #{}: cipher suite {} not supported", i, suite);
                continue;
            }
            match respond_with(suite, &offer.public_key) {
                Ok((public_key, shared_secret)) => {
                    log::debug!(
                        "Offer #{}: negotiated {} (client key {}, server key {})",
                        i,
                        suite,
                        fingerprint(&offer.public_key),
                        fingerprint(&public_key)
                    );
                    return Ok(Negotiated {
                        cipher_suite: suite,
                        public_key,
                        shared_secret,
                    });
                }
                Err(e) => {
                    log::debug!("Offer #{}: {} unusable: {}", i, suite, e);
                    if self.offer_failure_policy == OfferFailurePolicy::Abort {
                        break;
                    }
                }
            }
        }
        log::warn!("Negotiation failed ({} offers)", offers.len());
        Err(NegotiationError::NoSupportedSuite)
    }
}

impl Default for Negotiator {
    fn default() -> Self {
        Self::new(&NegotiatorConfig::default())
    }
}

impl std::fmt::Debug for Negotiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Negotiator")
            .field("offer_failure_policy", &self.offer_failure_policy)
            .finish_non_exhaustive()
    }
}
