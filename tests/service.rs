mod logging;

use kexchange::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Default)]
struct CountingHandler(AtomicUsize);

impl ServiceHandler for CountingHandler {
    fn on_established(&self, _: CipherSuite, secret: Secret) {
        assert!(!secret.is_empty());
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn initiator() -> Initiator {
    let config = InitiatorConfig {
        cipher_suites: vec![CipherSuite::Ecdh],
        dh_key_size: 1024,
        ecdh_curve: "x25519".into(),
    };
    Initiator::new(&config).unwrap()
}

#[tokio::test]
async fn test_serve_01() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let handler = Arc::new(CountingHandler::default());
    let service = CryptoService::new(&ServiceConfig::default()).with_handler(handler.clone());
    let (tx, rx) = mpsc::channel(4);
    let server = tokio::spawn(service.serve(rx));

    let mut pending = Vec::new();
    for _ in 0..10 {
        let i = initiator();
        let (request, reply) = Request::new(i.request());
        tx.send(request).await?;
        pending.push((i, reply));
    }
    for (i, reply) in pending {
        let response = reply.await??;
        i.finish(&response.offer)?;
    }
    drop(tx);
    server.await?;
    assert_eq!(handler.0.load(Ordering::SeqCst), 10);
    Ok(())
}

#[tokio::test]
async fn test_serve_invalid_argument_01() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let service = CryptoService::new(&ServiceConfig::default());
    let (tx, rx) = mpsc::channel(1);
    let server = tokio::spawn(service.serve(rx));

    let (request, reply) = Request::new(MsgOpenConnection::new(vec![]));
    tx.send(request).await?;
    assert_eq!(reply.await?, Err(Status::InvalidArgument));

    let offer = HandshakeOffer::new(CipherSuite::Dh, vec![1, 2, 3]);
    let (request, reply) = Request::new(MsgOpenConnection::new(vec![offer]));
    tx.send(request).await?;
    assert_eq!(reply.await?, Err(Status::InvalidArgument));

    drop(tx);
    server.await?;
    Ok(())
}

#[tokio::test]
async fn test_serve_requester_gone_01() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let service = CryptoService::new(&ServiceConfig::default());
    let (tx, rx) = mpsc::channel(2);
    let server = tokio::spawn(service.serve(rx));

    let (request, reply) = Request::new(initiator().request());
    drop(reply);
    tx.send(request).await?;

    let i = initiator();
    let (request, reply) = Request::new(i.request());
    tx.send(request).await?;
    i.finish(&reply.await??.offer)?;

    drop(tx);
    server.await?;
    Ok(())
}

#[tokio::test]
async fn test_serve_deadline_01() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let slow = |_: CipherSuite| {
        std::thread::sleep(Duration::from_millis(300));
        true
    };
    let negotiator = Negotiator::with_policy(slow, OfferFailurePolicy::Continue);
    let service = CryptoService::with_negotiator(negotiator, Duration::from_millis(20));
    let (tx, rx) = mpsc::channel(1);
    let server = tokio::spawn(service.serve(rx));

    let (request, reply) = Request::new(initiator().request());
    tx.send(request).await?;
    assert_eq!(reply.await?, Err(Status::DeadlineExceeded));

    drop(tx);
    server.await?;
    Ok(())
}

#[tokio::test]
async fn test_serve_closed_01() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let service = CryptoService::new(&ServiceConfig::default());
    let (tx, rx) = mpsc::channel::<Request>(1);
    drop(tx);
    tokio::time::timeout(Duration::from_secs(5), service.serve(rx)).await?;
    Ok(())
}
