use super::super::spki::OID_X25519;
use crate::util::codec::Oid;
use std::sync::OnceLock;

/// Named curves known to this implementation.
///
/// Whether a curve is actually usable depends on the backends compiled in (see
/// [supported_curves]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-256 (a.k.a. `prime256v1`)
    Secp256r1,
    /// NIST P-384
    Secp384r1,
    /// Curve25519 in Montgomery form (RFC 7748)
    X25519,
}

impl Curve {
    pub const ALL: [Self; 3] = [Self::Secp256r1, Self::Secp384r1, Self::X25519];

    /// The canonical curve name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Secp256r1 => "secp256r1",
            Self::Secp384r1 => "secp384r1",
            Self::X25519 => "x25519",
        }
    }

    /// Alternative names that are accepted when a curve is selected by name.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Secp256r1 => &["prime256v1", "P-256", "NIST P-256"],
            Self::Secp384r1 => &["P-384", "NIST P-384"],
            Self::X25519 => &["X25519"],
        }
    }

    /// The `namedCurve` OID (or the algorithm OID for X25519).
    pub const fn oid(self) -> Oid {
        match self {
            Self::Secp256r1 => Oid(&[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07]),
            Self::Secp384r1 => Oid(&[0x2b, 0x81, 0x04, 0x00, 0x22]),
            Self::X25519 => OID_X25519,
        }
    }

    /// Size of the shared secret in bytes.
    pub const fn secret_len(self) -> usize {
        match self {
            Self::Secp256r1 => 32,
            Self::Secp384r1 => 48,
            Self::X25519 => 32,
        }
    }

    fn is_compiled_in(self) -> bool {
        match self {
            Self::Secp256r1 => cfg!(feature = "p256"),
            Self::Secp384r1 => cfg!(feature = "p384"),
            Self::X25519 => true,
        }
    }

    fn is_named(self, name: &str) -> bool {
        self.name() == name || self.aliases().contains(&name)
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

static SUPPORTED_CURVES: OnceLock<Vec<Curve>> = OnceLock::new();

/// The curves usable for ECDH in this process.
///
/// Determined once on first use and never changed afterwards.
pub fn supported_curves() -> &'static [Curve] {
    SUPPORTED_CURVES.get_or_init(|| {
        let curves: Vec<Curve> = Curve::ALL
            .iter()
            .copied()
            .filter(|c| c.is_compiled_in())
            .collect();
        log::debug!("Supported ECDH curves: {:?}", curves);
        curves
    })
}

/// Find a supported curve by its name (or alias).
pub fn lookup_curve(name: &str) -> Option<Curve> {
    supported_curves().iter().copied().find(|c| c.is_named(name))
}

/// Find a supported curve by its `namedCurve` OID.
pub(super) fn lookup_curve_oid(oid: &[u8]) -> Option<Curve> {
    supported_curves().iter().copied().find(|c| c.oid().matches(oid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_curves_01() {
        let curves = supported_curves();
        assert!(curves.contains(&Curve::X25519));
        assert_eq!(curves.contains(&Curve::Secp256r1), cfg!(feature = "p256"));
        assert_eq!(curves.contains(&Curve::Secp384r1), cfg!(feature = "p384"));
    }

    #[test]
    fn test_supported_curves_02() {
        // Discovery happens exactly once: all calls observe the same allocation.
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| supported_curves().as_ptr() as usize))
            .collect();
        let ptrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ptrs.iter().all(|p| *p == supported_curves().as_ptr() as usize));
    }

    #[test]
    fn test_lookup_01() {
        assert_eq!(lookup_curve("x25519"), Some(Curve::X25519));
        assert_eq!(lookup_curve("X25519"), Some(Curve::X25519));
        assert_eq!(lookup_curve("secp521r1"), None);
        assert_eq!(lookup_curve(""), None);
        assert_eq!(lookup_curve("x25519 "), None);
    }

    #[cfg(feature = "p256")]
    #[test]
    fn test_lookup_02() {
        assert_eq!(lookup_curve("secp256r1"), Some(Curve::Secp256r1));
        assert_eq!(lookup_curve("prime256v1"), Some(Curve::Secp256r1));
        assert_eq!(lookup_curve("P-256"), Some(Curve::Secp256r1));
        assert_eq!(
            lookup_curve_oid(&[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07]),
            Some(Curve::Secp256r1)
        );
    }

    #[test]
    fn test_display_01() {
        assert_eq!(format!("{}", Curve::Secp384r1), "secp384r1");
    }
}
