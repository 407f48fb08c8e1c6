//! Canned HTTP server for exercising the client without the network.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Clone)]
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn new(path: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            path,
            status,
            body: body.into(),
        }
    }
}

pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Serve `routes` until the test ends. Requests are matched on the path
    /// without the query string; unknown paths get a 404.
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    handle(stream, &routes, &seen).await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// Raw request heads received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(mut stream: TcpStream, routes: &[Route], seen: &Mutex<Vec<String>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let head = String::from_utf8_lossy(&buf).to_string();
    seen.lock().unwrap().push(head.clone());

    let target = head.split_whitespace().nth(1).unwrap_or("/");
    let path = target.split('?').next().unwrap_or(target);

    let (status, body) = routes
        .iter()
        .find(|r| r.path == path)
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or((404, r#"{"message":"Not Found"}"#.to_string()));

    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Header value for `name` in a raw request head, case-insensitive.
pub fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim())
    })
}

pub fn contributors_json(count: usize) -> String {
    let items: Vec<_> = (0..count)
        .map(|i| {
            serde_json::json!({
                "login": format!("user{i}"),
                "id": 1000 + i,
                "node_id": "MDQ6VXNlcjE=",
                "avatar_url": format!("https://avatars.githubusercontent.com/u/{}", 1000 + i),
                "html_url": format!("https://github.com/user{i}"),
                "type": "User",
                "site_admin": false,
                "contributions": 50 - i
            })
        })
        .collect();
    serde_json::to_string(&items).unwrap()
}

/// `(state, merged_at)` per PR, numbered from the highest down like the API.
pub fn pulls_json(prs: &[(&str, Option<&str>)]) -> String {
    let total = prs.len();
    let items: Vec<_> = prs
        .iter()
        .enumerate()
        .map(|(i, (state, merged_at))| {
            let number = total - i;
            serde_json::json!({
                "number": number,
                "title": format!("PR number {number}"),
                "state": state,
                "created_at": "2025-10-01T08:00:00Z",
                "merged_at": merged_at,
                "html_url": format!("https://github.com/hari7261/Hacktoberfest-2025/pull/{number}"),
                "user": {
                    "login": format!("author{number}"),
                    "id": number,
                    "avatar_url": "https://avatars.githubusercontent.com/u/9"
                }
            })
        })
        .collect();
    serde_json::to_string(&items).unwrap()
}
