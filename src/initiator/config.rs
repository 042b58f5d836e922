use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitiatorConfig {
    /// Cipher suites to offer in order of preference.
    ///
    /// Defaults to all suites (`DH` before `ECDH`).
    pub cipher_suites: Vec<CipherSuite>,
    /// Modulus size in bits for the `DH` offer (1024, 2048 or 3072).
    ///
    /// Defaults to 2048.
    pub dh_key_size: usize,
    /// Curve name for the `ECDH` offer.
    ///
    /// Defaults to `secp256r1`.
    pub ecdh_curve: String,
}

impl Default for InitiatorConfig {
    fn default() -> Self {
        Self {
            cipher_suites: CipherSuite::ALL.to_vec(),
            dh_key_size: 2048,
            ecdh_curve: "secp256r1".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_01() {
        let c = InitiatorConfig::default();
        assert_eq!(c.cipher_suites, vec![CipherSuite::Dh, CipherSuite::Ecdh]);
        assert_eq!(c.dh_key_size, 2048);
        assert_eq!(c.ecdh_curve, "secp256r1");
    }
}
