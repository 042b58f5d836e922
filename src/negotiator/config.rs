use super::*;

/// What to do when an offer of an enabled cipher suite turns out to be unusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OfferFailurePolicy {
    /// Skip the offer and try the next one.
    Continue,
    /// Fail the whole negotiation.
    Abort,
}

impl Default for OfferFailurePolicy {
    fn default() -> Self {
        Self::Continue
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiatorConfig {
    /// Cipher suites the server is willing to negotiate.
    ///
    /// The order is irrelevant: the client's order of preference decides.
    ///
    /// Defaults to all suites (`DH` and `ECDH`).
    pub cipher_suites: Vec<CipherSuite>,
    /// Behaviour on offers that are enabled but cannot be used (malformed or unsupported key).
    ///
    /// Defaults to [OfferFailurePolicy::Continue].
    pub offer_failure_policy: OfferFailurePolicy,
}

impl Default for NegotiatorConfig {
    fn default() -> Self {
        Self {
            cipher_suites: CipherSuite::ALL.to_vec(),
            offer_failure_policy: OfferFailurePolicy::default(),
        }
    }
}
