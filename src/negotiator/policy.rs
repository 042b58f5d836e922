use super::*;

/// Decides whether an offered cipher suite may be negotiated at all.
pub trait SuitePolicy: Send + Sync {
    fn is_supported(&self, suite: CipherSuite) -> bool;
}

impl<F: Fn(CipherSuite) -> bool + Send + Sync> SuitePolicy for F {
    fn is_supported(&self, suite: CipherSuite) -> bool {
        self(suite)
    }
}

/// Accepts exactly the listed cipher suites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowedSuites(pub Vec<CipherSuite>);

impl SuitePolicy for AllowedSuites {
    fn is_supported(&self, suite: CipherSuite) -> bool {
        self.0.contains(&suite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_suites_01() {
        let p = AllowedSuites(vec![CipherSuite::Ecdh]);
        assert!(p.is_supported(CipherSuite::Ecdh));
        assert!(!p.is_supported(CipherSuite::Dh));
        assert!(!AllowedSuites(vec![]).is_supported(CipherSuite::Ecdh));
    }

    #[test]
    fn test_closure_01() {
        let p = |s: CipherSuite| s == CipherSuite::Dh;
        assert!(p.is_supported(CipherSuite::Dh));
        assert!(!p.is_supported(CipherSuite::Ecdh));
    }
}
