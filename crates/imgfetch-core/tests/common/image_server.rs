//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of routes. Each route has a status, an optional
//! Content-Type, a body, and an optional delay before responding (for timeouts).
//! Unknown paths get 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: &'static str,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
    /// If set, respond `302 Found` with this Location instead.
    pub redirect_to: Option<&'static str>,
}

impl Route {
    pub fn ok(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: "200 OK",
            content_type: Some(content_type),
            body: body.to_vec(),
            delay: None,
            redirect_to: None,
        }
    }

    pub fn without_content_type(body: &[u8]) -> Self {
        Self {
            content_type: None,
            ..Self::ok("unused", body)
        }
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            content_type: Some("text/plain"),
            body: b"error".to_vec(),
            delay: None,
            redirect_to: None,
        }
    }

    pub fn redirect(location: &'static str) -> Self {
        Self {
            status: "302 Found",
            content_type: Some("text/html"),
            body: Vec::new(),
            delay: None,
            redirect_to: Some(location),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Handle to a running server. The server runs until the process exits.
pub struct ImageServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl ImageServer {
    /// Full URL for `path` (which must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `routes` keyed by path.
pub fn start(routes: Vec<(&'static str, Route)>) -> ImageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<&'static str, Route>> = Arc::new(routes.into_iter().collect());
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            hits_srv.fetch_add(1, Ordering::SeqCst);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    ImageServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<&'static str, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let target = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/");

    let not_found = Route::status("404 Not Found");
    let route = routes.get(path).unwrap_or(&not_found);

    if let Some(delay) = route.delay {
        thread::sleep(delay);
    }

    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status,
        route.body.len()
    );
    if let Some(ct) = route.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    if let Some(location) = route.redirect_to {
        head.push_str(&format!("Location: {}\r\n", location));
    }
    head.push_str("\r\n");

    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
}
