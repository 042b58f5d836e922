use std::convert::TryFrom;

/// Identifies the key exchange algorithm family of a handshake offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherSuite {
    /// Finite field Diffie-Hellman.
    Dh,
    /// Elliptic curve Diffie-Hellman.
    Ecdh,
}

impl CipherSuite {
    /// All cipher suites known to this implementation.
    pub const ALL: [Self; 2] = [Self::Dh, Self::Ecdh];

    /// The number used to identify the cipher suite on the wire.
    pub const fn number(self) -> u32 {
        match self {
            Self::Dh => 1,
            Self::Ecdh => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Dh => "DH",
            Self::Ecdh => "ECDH",
        }
    }
}

impl TryFrom<u32> for CipherSuite {
    type Error = u32;

    fn try_from(x: u32) -> Result<Self, u32> {
        match x {
            1 => Ok(Self::Dh),
            2 => Ok(Self::Ecdh),
            n => Err(n),
        }
    }
}

impl std::fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_01() {
        for suite in CipherSuite::ALL {
            assert_eq!(CipherSuite::try_from(suite.number()), Ok(suite));
        }
    }

    #[test]
    fn test_number_02() {
        assert_eq!(CipherSuite::try_from(0), Err(0));
        assert_eq!(CipherSuite::try_from(3), Err(3));
    }

    #[test]
    fn test_display_01() {
        assert_eq!(format!("{}", CipherSuite::Dh), "DH");
        assert_eq!(format!("{}", CipherSuite::Ecdh), "ECDH");
    }
}
