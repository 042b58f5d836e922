use super::*;
use crate::algorithm::CipherSuite;
use crate::util::codec::*;
use std::convert::TryFrom;

/// The client's request: handshake offers in order of preference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgOpenConnection {
    pub offers: Vec<HandshakeOffer>,
}

impl MsgOpenConnection {
    pub fn new(offers: Vec<HandshakeOffer>) -> Self {
        Self { offers }
    }
}

impl Message for MsgOpenConnection {
    const NUMBER: u8 = 1;
}

impl Encode for MsgOpenConnection {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_u8(<Self as Message>::NUMBER)?;
        e.push_list(&self.offers)
    }
}

impl Decode for MsgOpenConnection {
    /// Entries with unknown cipher suite numbers are dropped (they could not be negotiated
    /// anyway), the order of the remaining entries is preserved.
    fn decode<'a, D: Decoder<'a>>(d: &mut D) -> Option<Self> {
        d.expect_u8(<Self as Message>::NUMBER)?;
        let data: Vec<HandshakeData> = d.take_list()?;
        let offers = data
            .into_iter()
            .filter_map(|x| match CipherSuite::try_from(x.cipher_suite) {
                Ok(suite) => Some(HandshakeOffer::new(suite, x.public_key.into())),
                Err(n) => {
                    log::debug!("Ignoring offer with unknown cipher suite {}", n);
                    None
                }
            })
            .collect();
        Some(Self { offers })
    }
}
