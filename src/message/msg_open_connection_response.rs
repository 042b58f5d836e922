use super::*;
use crate::util::codec::*;

/// The server's reply: the selected cipher suite and the server's public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgOpenConnectionResponse {
    pub offer: HandshakeOffer,
}

impl MsgOpenConnectionResponse {
    pub fn new(offer: HandshakeOffer) -> Self {
        Self { offer }
    }
}

impl Message for MsgOpenConnectionResponse {
    const NUMBER: u8 = 2;
}

impl Encode for MsgOpenConnectionResponse {
    fn encode<E: Encoder>(&self, e: &mut E) -> Option<()> {
        e.push_u8(<Self as Message>::NUMBER)?;
        e.push(&self.offer)
    }
}

impl Decode for MsgOpenConnectionResponse {
    fn decode<'a, D: Decoder<'a>>(d: &mut D) -> Option<Self> {
        d.expect_u8(<Self as Message>::NUMBER)?;
        Some(Self { offer: d.take()? })
    }
}
