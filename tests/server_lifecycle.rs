mod common;

use boltlink::domain::repositories::LinkRepository;
use boltlink::infrastructure::persistence::SledLinkRepository;
use boltlink::server::serve;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct RunningServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

async fn start(idle_timeout: Duration) -> (RunningServer, Arc<SledLinkRepository>) {
    let repository = common::create_test_repository();
    let app = common::create_test_app(repository.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        serve(listener, app, idle_timeout, async {
            let _ = rx.await;
        })
        .await;
    });

    (
        RunningServer {
            addr,
            shutdown,
            handle,
        },
        repository,
    )
}

/// Sends one request with `Connection: close` and returns the raw response.
async fn send(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_serve_create_and_redirect_over_tcp() {
    let (server, repository) = start(Duration::from_secs(30)).await;

    let body = r#"{"destination":"https://example.com/tcp"}"#;
    let response = send(
        server.addr,
        &format!(
            "POST / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ),
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 201"), "{}", response);
    assert_eq!(repository.count().await.unwrap(), 1);

    let link = repository.list(1).await.unwrap().remove(0);
    let response = send(
        server.addr,
        &format!(
            "GET /{} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            link.id
        ),
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 301"), "{}", response);
    assert!(
        response
            .to_ascii_lowercase()
            .contains("location: https://example.com/tcp"),
        "{}",
        response
    );

    server.shutdown.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .unwrap()
        .unwrap();
}

/// Reads until the server closes the connection, failing after 5 seconds.
async fn expect_closed(stream: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut buf)).await;
    assert!(read.is_ok(), "connection was not closed by the server");
    buf
}

#[tokio::test]
async fn test_silent_connection_is_closed() {
    let (server, _repository) = start(Duration::from_millis(200)).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    let received = expect_closed(&mut stream).await;
    assert!(received.is_empty());

    server.shutdown.send(()).unwrap();
    server.handle.await.unwrap();
}

#[tokio::test]
async fn test_idle_keep_alive_connection_is_closed() {
    let (server, _repository) = start(Duration::from_millis(200)).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let received = expect_closed(&mut stream).await;
    assert!(String::from_utf8_lossy(&received).starts_with("HTTP/1.1 200"));

    server.shutdown.send(()).unwrap();
    server.handle.await.unwrap();
}

#[tokio::test]
async fn test_unresponsive_http2_connection_is_closed() {
    let (server, _repository) = start(Duration::from_millis(200)).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    // Connection preface followed by an empty SETTINGS frame, then silence.
    stream
        .write_all(b"PRI * HTTP/2.0\r\n\r\nSM\r\n\r\n")
        .await
        .unwrap();
    stream
        .write_all(&[0, 0, 0, 0x4, 0, 0, 0, 0, 0])
        .await
        .unwrap();

    expect_closed(&mut stream).await;

    server.shutdown.send(()).unwrap();
    server.handle.await.unwrap();
}

#[tokio::test]
async fn test_shutdown_stops_accepting_connections() {
    let (server, _repository) = start(Duration::from_secs(30)).await;
    let addr = server.addr;

    server.shutdown.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .unwrap()
        .unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}
