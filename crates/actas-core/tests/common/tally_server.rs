//! Minimal HTTP/1.1 server standing in for the results API in integration tests.
//!
//! Accepts `POST` with a JSON body `{"codigoMesa": N}` and answers from a fixed
//! table of replies. Every request is recorded so tests can assert which mesas
//! were asked for.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use base64::Engine;

#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with `{"adjunto":[{"valor": base64(bytes)}]}`.
    Image(Vec<u8>),
    /// 200 with the given raw body.
    Body(String),
    /// Bare status with an empty JSON object.
    Status(u16),
    /// Read the request and never answer.
    Hang,
    /// Like `Image`, but the body arrives in small pieces with a pause between each.
    Trickle(Vec<u8>, Duration),
}

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct Seen {
    pub mesa: Option<u64>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Seen {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct TallyServer {
    pub url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl TallyServer {
    /// Mesa codes requested so far, in arrival order.
    pub fn requested(&self) -> Vec<u64> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter_map(|s| s.mesa)
            .collect()
    }

    pub fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Mesas missing from `replies` get 404.
/// The server runs until the process exits.
pub fn start(replies: HashMap<u64, Reply>) -> TallyServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let replies = Arc::new(replies);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_srv = Arc::clone(&seen);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let replies = Arc::clone(&replies);
            let seen = Arc::clone(&seen_srv);
            thread::spawn(move || handle(stream, &replies, &seen));
        }
    });
    TallyServer {
        url: format!("http://127.0.0.1:{}/api/v1/resultados/mesa", port),
        seen,
    }
}

/// A URL on a port with nothing listening.
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/v1/resultados/mesa", port)
}

pub fn image_body(bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!(r#"{{"adjunto":[{{"valor":"{}","tipo":"image/jpeg"}}],"codigoMesa":0}}"#, b64)
}

fn handle(mut stream: TcpStream, replies: &HashMap<u64, Reply>, seen: &Mutex<Vec<Seen>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let Some(req) = read_request(&mut stream) else {
        return;
    };
    let mesa = serde_json::from_str::<serde_json::Value>(&req.body)
        .ok()
        .and_then(|v| v.get("codigoMesa").and_then(|m| m.as_u64()));
    seen.lock().unwrap().push(Seen {
        mesa,
        ..req
    });

    let (status, body) = match mesa.and_then(|m| replies.get(&m)) {
        Some(Reply::Image(bytes)) => ("200 OK".to_string(), image_body(bytes)),
        Some(Reply::Body(b)) => ("200 OK".to_string(), b.clone()),
        Some(Reply::Status(code)) => (format!("{} Status", code), "{}".to_string()),
        Some(Reply::Hang) => {
            thread::sleep(Duration::from_secs(30));
            return;
        }
        Some(Reply::Trickle(bytes, pause)) => {
            trickle(&mut stream, image_body(bytes).as_bytes(), *pause);
            return;
        }
        None => ("404 Not Found".to_string(), "{}".to_string()),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn trickle(stream: &mut TcpStream, body: &[u8], pause: Duration) {
    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }
    let piece = body.len().div_ceil(6).max(1);
    for chunk in body.chunks(piece) {
        thread::sleep(pause);
        if stream.write_all(chunk).and_then(|_| stream.flush()).is_err() {
            return;
        }
    }
}

fn read_request(stream: &mut TcpStream) -> Option<Seen> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut headers = Vec::new();
    for line in head.lines().skip(1) {
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }
    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let end = (header_end + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end..end]).into_owned();
    Some(Seen {
        mesa: None,
        headers,
        body,
    })
}
