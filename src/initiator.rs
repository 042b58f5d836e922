//! Client side of the handshake.
mod config;

pub use self::config::*;

use crate::algorithm::kex::*;
use crate::algorithm::CipherSuite;
use crate::message::{HandshakeOffer, MsgOpenConnection};
use crate::util::secret::Secret;

/// Holds one fresh key pair per offered cipher suite until the server has replied.
#[derive(Debug)]
pub struct Initiator {
    offers: Vec<HandshakeOffer>,
    key_pairs: Vec<OfferedKeyPair>,
}

#[derive(Debug)]
enum OfferedKeyPair {
    Dh(DhKeyPair),
    Ecdh(EcdhKeyPair),
}

impl Initiator {
    pub fn new(config: &InitiatorConfig) -> Result<Self, KexError> {
        let mut offers = Vec::with_capacity(config.cipher_suites.len());
        let mut key_pairs = Vec::with_capacity(config.cipher_suites.len());
        for &suite in &config.cipher_suites {
            if offers.iter().any(|o: &HandshakeOffer| o.cipher_suite == suite) {
                continue;
            }
            let (public_key, key_pair) = match suite {
                CipherSuite::Dh => {
                    let kp = Dh::generate_key_pair(&config.dh_key_size)?;
                    (Dh::export_public_key(&kp).to_vec(), OfferedKeyPair::Dh(kp))
                }
                CipherSuite::Ecdh => {
                    let kp = Ecdh::generate_key_pair(config.ecdh_curve.as_str())?;
                    (Ecdh::export_public_key(&kp).to_vec(), OfferedKeyPair::Ecdh(kp))
                }
            };
            offers.push(HandshakeOffer::new(suite, public_key));
            key_pairs.push(key_pair);
        }
        Ok(Self { offers, key_pairs })
    }

    /// The offers in order of preference.
    pub fn offers(&self) -> &[HandshakeOffer] {
        &self.offers
    }

    pub fn request(&self) -> MsgOpenConnection {
        MsgOpenConnection::new(self.offers.clone())
    }

    /// Complete the exchange with the server's response.
    ///
    /// All key pairs (used or not) are dropped when this returns.
    pub fn finish(self, response: &HandshakeOffer) -> Result<Secret, KexError> {
        let suite = response.cipher_suite;
        let peer = &response.public_key;
        for key_pair in self.key_pairs {
            match (key_pair, suite) {
                (OfferedKeyPair::Dh(kp), CipherSuite::Dh) => return complete::<Dh>(kp, peer),
                (OfferedKeyPair::Ecdh(kp), CipherSuite::Ecdh) => return complete::<Ecdh>(kp, peer),
                _ => (),
            }
        }
        Err(KexError::UnsupportedParams(format!(
            "cipher suite {} was not offered",
            suite
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::negotiator::Negotiator;

    fn config(suites: &[CipherSuite]) -> InitiatorConfig {
        InitiatorConfig {
            cipher_suites: suites.to_vec(),
            dh_key_size: 1024,
            ecdh_curve: "x25519".into(),
        }
    }

    #[test]
    fn test_offers_01() {
        let i = Initiator::new(&config(&[CipherSuite::Ecdh, CipherSuite::Dh])).unwrap();
        let suites: Vec<_> = i.offers().iter().map(|o| o.cipher_suite).collect();
        assert_eq!(suites, vec![CipherSuite::Ecdh, CipherSuite::Dh]);
        assert!(Ecdh::parse_public_key(&i.offers()[0].public_key).is_ok());
        assert!(Dh::parse_public_key(&i.offers()[1].public_key).is_ok());
        assert_eq!(i.request().offers, i.offers());
    }

    #[test]
    fn test_offers_duplicate_01() {
        let i = Initiator::new(&config(&[CipherSuite::Dh, CipherSuite::Dh])).unwrap();
        assert_eq!(i.offers().len(), 1);
    }

    #[test]
    fn test_unsupported_01() {
        let mut c = config(&[CipherSuite::Ecdh]);
        c.ecdh_curve = "secp521r1".into();
        assert!(matches!(
            Initiator::new(&c),
            Err(KexError::UnsupportedParams(_))
        ));
        let mut c = config(&[CipherSuite::Dh]);
        c.dh_key_size = 4096;
        assert!(matches!(
            Initiator::new(&c),
            Err(KexError::UnsupportedParams(_))
        ));
    }

    #[test]
    fn test_finish_01() {
        for suite in CipherSuite::ALL {
            let i = Initiator::new(&config(&CipherSuite::ALL)).unwrap();
            let policy = move |s: CipherSuite| s == suite;
            let n = Negotiator::with_policy(policy, Default::default());
            let r = n.negotiate(i.offers()).unwrap();
            assert_eq!(r.cipher_suite, suite);
            assert_eq!(i.finish(&r.response()).unwrap(), r.shared_secret);
        }
    }

    #[test]
    fn test_finish_not_offered_01() {
        let i = Initiator::new(&config(&[CipherSuite::Ecdh])).unwrap();
        let j = Initiator::new(&config(&[CipherSuite::Dh])).unwrap();
        let r = Negotiator::default().negotiate(j.offers()).unwrap();
        assert!(matches!(
            i.finish(&r.response()),
            Err(KexError::UnsupportedParams(_))
        ));
    }

    #[test]
    fn test_finish_garbage_01() {
        let i = Initiator::new(&config(&[CipherSuite::Ecdh])).unwrap();
        let response = HandshakeOffer::new(CipherSuite::Ecdh, vec![1, 2, 3]);
        assert!(matches!(i.finish(&response), Err(KexError::Parse(_))));
    }
}
