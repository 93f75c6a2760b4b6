//! Shared helpers for integration tests: in-process fake HTTP services.

#![allow(dead_code)]

use axum::Router;
use sha1::{Digest, Sha1};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Bind first so the router can embed its own address in responses.
pub async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

pub fn serve(listener: TcpListener, router: Router) {
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
}

/// A minimal single-file torrent and the SHA-1 of its info dictionary.
pub fn sample_torrent(name: &str) -> (Vec<u8>, String) {
    // Keys deliberately out of sorted order
    let mut info = format!("d4:name{}:{}6:lengthi1073741824e", name.len(), name).into_bytes();
    info.extend_from_slice(b"12:piece lengthi262144e6:pieces20:");
    info.extend_from_slice(&[0xab; 20]);
    info.push(b'e');
    let expected = hex::encode(Sha1::digest(&info));

    let mut torrent = b"d8:announce31:http://tracker.example/announce4:info".to_vec();
    torrent.extend_from_slice(&info);
    torrent.push(b'e');

    (torrent, expected)
}
