mod cipher_suite;
pub mod kex;

pub use self::cipher_suite::CipherSuite;
pub use self::kex::{KexAlgorithm, KexError};
