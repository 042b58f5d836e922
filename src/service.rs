//! Request/response front of the [Negotiator].
mod config;
mod status;

pub use self::config::*;
pub use self::status::*;

use crate::algorithm::CipherSuite;
use crate::message::*;
use crate::negotiator::{Negotiated, Negotiator};
use crate::util::codec::Codec;
use crate::util::secret::Secret;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

/// Receives the outcome of successful negotiations.
pub trait ServiceHandler: Send + Sync + 'static {
    /// Called once per successful negotiation, after the response has been built.
    fn on_established(&self, cipher_suite: CipherSuite, secret: Secret);
}

/// Discards all secrets.
impl ServiceHandler for () {
    fn on_established(&self, _: CipherSuite, _: Secret) {}
}

pub type Reply = Result<MsgOpenConnectionResponse, Status>;

/// A request as it is passed to [CryptoService::serve].
#[derive(Debug)]
pub struct Request {
    pub message: MsgOpenConnection,
    pub reply: oneshot::Sender<Reply>,
}

impl Request {
    pub fn new(message: MsgOpenConnection) -> (Self, oneshot::Receiver<Reply>) {
        let (reply, rx) = oneshot::channel();
        (Self { message, reply }, rx)
    }
}

#[derive(Clone)]
pub struct CryptoService {
    negotiator: Arc<Negotiator>,
    handler: Arc<dyn ServiceHandler>,
    negotiation_timeout: Duration,
}

impl CryptoService {
    pub fn new(config: &ServiceConfig) -> Self {
        let negotiator = Negotiator::new(&config.negotiator);
        Self::with_negotiator(negotiator, config.negotiation_timeout)
    }

    pub fn with_negotiator(negotiator: Negotiator, negotiation_timeout: Duration) -> Self {
        Self {
            negotiator: Arc::new(negotiator),
            handler: Arc::new(()),
            negotiation_timeout,
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn ServiceHandler>) -> Self {
        self.handler = handler;
        self
    }

    /// Negotiate synchronously on the current thread.
    pub fn open_connection(&self, msg: &MsgOpenConnection) -> Reply {
        let negotiated = self.negotiator.negotiate(&msg.offers)?;
        Ok(self.establish(negotiated))
    }

    /// Like [Self::open_connection], but on encoded messages.
    pub fn open_connection_bytes(&self, request: &[u8]) -> Result<Vec<u8>, Status> {
        let msg: MsgOpenConnection = Codec::decode(request).map_err(|e| {
            log::debug!("Invalid request: {}", e);
            Status::InvalidArgument
        })?;
        let response = self.open_connection(&msg)?;
        Codec::encode(&response).map_err(|e| {
            log::error!("Encoding response failed: {}", e);
            Status::Internal
        })
    }

    /// Negotiate on the blocking thread pool, bounded by the negotiation timeout.
    pub async fn call(&self, msg: MsgOpenConnection) -> Reply {
        let negotiator = self.negotiator.clone();
        let task = tokio::task::spawn_blocking(move || negotiator.negotiate(&msg.offers));
        match tokio::time::timeout(self.negotiation_timeout, task).await {
            Ok(Ok(negotiated)) => Ok(self.establish(negotiated?)),
            Ok(Err(e)) => {
                log::error!("Negotiation task failed: {}", e);
                Err(Status::Internal)
            }
            Err(_) => {
                log::error!(
                    "Negotiation exceeded timeout of {:?}",
                    self.negotiation_timeout
                );
                Err(Status::DeadlineExceeded)
            }
        }
    }

    /// Answer requests until the channel is closed and all pending requests are answered.
    ///
    /// Every request gets exactly one reply. Requests are processed concurrently.
    pub async fn serve(self, mut requests: mpsc::Receiver<Request>) {
        let mut pending = JoinSet::<()>::new();
        loop {
            tokio::select! {
                x = requests.recv() => {
                    let Some(request) = x else { break };
                    let service = self.clone();
                    let _ = pending.spawn(async move {
                        let reply = service.call(request.message).await;
                        if request.reply.send(reply).is_err() {
                            log::debug!("Requester gone before reply");
                        }
                    });
                }
                x = pending.join_next(), if !pending.is_empty() => {
                    log_join_error(x);
                }
            }
        }
        log::debug!("Request channel closed ({} pending)", pending.len());
        while let Some(x) = pending.join_next().await {
            log_join_error(Some(x));
        }
    }

    fn establish(&self, negotiated: Negotiated) -> MsgOpenConnectionResponse {
        let response = MsgOpenConnectionResponse::new(negotiated.response());
        self.handler
            .on_established(negotiated.cipher_suite, negotiated.shared_secret);
        response
    }
}

fn log_join_error(x: Option<Result<(), tokio::task::JoinError>>) {
    if let Some(Err(e)) = x {
        log::error!("Request task failed: {}", e);
    }
}

impl std::fmt::Debug for CryptoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoService")
            .field("negotiator", &self.negotiator)
            .field("negotiation_timeout", &self.negotiation_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initiator::{Initiator, InitiatorConfig};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<(CipherSuite, Secret)>>);

    impl ServiceHandler for Collect {
        fn on_established(&self, cipher_suite: CipherSuite, secret: Secret) {
            self.0.lock().unwrap().push((cipher_suite, secret))
        }
    }

    fn initiator() -> Initiator {
        let config = InitiatorConfig {
            cipher_suites: vec![CipherSuite::Ecdh, CipherSuite::Dh],
            dh_key_size: 1024,
            ecdh_curve: "x25519".into(),
        };
        Initiator::new(&config).unwrap()
    }

    #[test]
    fn test_open_connection_01() {
        let handler = Arc::new(Collect::default());
        let service = CryptoService::new(&ServiceConfig::default()).with_handler(handler.clone());
        let i = initiator();
        let response = service.open_connection(&i.request()).unwrap();
        assert_eq!(response.offer.cipher_suite, CipherSuite::Ecdh);
        let secret = i.finish(&response.offer).unwrap();
        let established = handler.0.lock().unwrap();
        assert_eq!(established.len(), 1);
        assert_eq!(established[0].0, CipherSuite::Ecdh);
        assert_eq!(established[0].1, secret);
    }

    #[test]
    fn test_open_connection_02() {
        let handler = Arc::new(Collect::default());
        let service = CryptoService::new(&ServiceConfig::default()).with_handler(handler.clone());
        let r = service.open_connection(&MsgOpenConnection::new(vec![]));
        assert_eq!(r, Err(Status::InvalidArgument));
        assert!(handler.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_open_connection_bytes_01() {
        let service = CryptoService::new(&ServiceConfig::default());
        let i = initiator();
        let request = Codec::encode(&i.request()).unwrap();
        let response = service.open_connection_bytes(&request).unwrap();
        let response: MsgOpenConnectionResponse = Codec::decode(&response).unwrap();
        assert_eq!(response.offer.cipher_suite, CipherSuite::Ecdh);
        assert!(i.finish(&response.offer).is_ok());
    }

    #[test]
    fn test_open_connection_bytes_02() {
        let service = CryptoService::new(&ServiceConfig::default());
        let requests: [&[u8]; 3] = [&[], &[1, 0, 0], &[2, 0, 0, 0, 0]];
        for request in requests {
            assert_eq!(
                service.open_connection_bytes(request),
                Err(Status::InvalidArgument)
            );
        }
    }

    #[tokio::test]
    async fn test_call_01() {
        let service = CryptoService::new(&ServiceConfig::default());
        let i = initiator();
        let response = service.call(i.request()).await.unwrap();
        assert!(i.finish(&response.offer).is_ok());
    }

    #[tokio::test]
    async fn test_call_timeout_01() {
        let slow = |_: CipherSuite| {
            std::thread::sleep(Duration::from_millis(500));
            true
        };
        let negotiator = Negotiator::with_policy(slow, Default::default());
        let handler = Arc::new(Collect::default());
        let service = CryptoService::with_negotiator(negotiator, Duration::from_millis(10))
            .with_handler(handler.clone());
        let r = service.call(initiator().request()).await;
        assert_eq!(r, Err(Status::DeadlineExceeded));
        assert!(handler.0.lock().unwrap().is_empty());
    }
}
