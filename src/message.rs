mod handshake_offer;
mod msg_open_connection;
mod msg_open_connection_response;

pub use self::handshake_offer::*;
pub use self::msg_open_connection::*;
pub use self::msg_open_connection_response::*;

/// All top-level handshake messages shall implement this trait.
pub trait Message {
    /// The first byte of the encoded message.
    const NUMBER: u8;
}
