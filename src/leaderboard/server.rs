//! HTTP server for the score endpoints.
//!
//! A tokio TcpListener with just enough HTTP/1.1 parsing for three routes.
//! Routing is synchronous over an already-parsed request so handlers can be
//! exercised in tests without opening sockets.

use crate::leaderboard::store::ScoreStore;
use serde::Serialize;
use serde_json::{json, Value};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// A parsed HTTP request: method, path, raw body.
#[derive(Debug)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

/// Status plus JSON body, ready to serialize onto the wire.
#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => Self::error(500, &e.to_string()),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }).to_string(),
        }
    }

    fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            201 => "Created",
            400 => "Bad Request",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }
}

/// Dispatch a request to its handler.
pub fn route(store: &ScoreStore, request: &Request) -> Response {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/addPlayer") => handle_add_player(store, &request.body),
        ("POST", "/addScore") => handle_add_score(store, &request.body),
        ("GET", "/getScore") => handle_get_scores(store),
        _ => Response::error(404, "Not Found"),
    }
}

/// `POST /addPlayer` `{name}`: create a record; 400 on missing/empty name.
fn handle_add_player(store: &ScoreStore, body: &[u8]) -> Response {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(_) => return Response::error(400, "Invalid JSON body"),
    };
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");
    if name.is_empty() {
        return Response::error(400, "Missing required fields");
    }

    match store.add_player(name) {
        Ok(record) => Response::json(201, &json!({ "message": "Score saved!", "data": record })),
        Err(e) => Response::error(500, &e.to_string()),
    }
}

/// `POST /addScore` `{id, currScore}`: upsert the record's score by id;
/// 400 when id is missing/empty or currScore is absent or null.
fn handle_add_score(store: &ScoreStore, body: &[u8]) -> Response {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(_) => return Response::error(400, "Invalid JSON body"),
    };
    let id = value.get("id").and_then(Value::as_str).unwrap_or("");
    let score = value.get("currScore").and_then(Value::as_i64);
    let (id, score) = match (id, score) {
        ("", _) | (_, None) => return Response::error(400, "Missing required fields"),
        (id, Some(score)) => (id, score),
    };

    match store.set_score(id, score) {
        Ok(record) => Response::json(201, &json!({ "message": "Score Updated", "data": record })),
        Err(e) => Response::error(500, &e.to_string()),
    }
}

/// `GET /getScore`: every record, sorted by score descending.
fn handle_get_scores(store: &ScoreStore) -> Response {
    match store.all_scores() {
        Ok(scores) => Response::json(200, &scores),
        Err(e) => Response::error(500, &e.to_string()),
    }
}

/// Build a runtime and serve until killed. Entry point for `skyflap --serve`.
pub fn run(port: u16, store: ScoreStore) -> io::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(port, Arc::new(store)))
}

/// Accept loop: one spawned task per connection.
pub async fn serve(port: u16, store: Arc<ScoreStore>) -> io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    eprintln!("Leaderboard server listening on http://localhost:{}", port);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, store).await {
                        eprintln!("Connection error from {}: {}", addr, e);
                    }
                });
            }
            Err(e) => {
                eprintln!("Accept error: {}", e);
            }
        }
    }
}

/// Read one request, write one response, close.
async fn handle_connection(stream: TcpStream, store: Arc<ScoreStore>) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    // Headers: only Content-Length matters for these routes
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).await?;
        if n == 0 || line.trim().is_empty() {
            break;
        }
        let lowered = line.to_ascii_lowercase();
        if let Some(value) = lowered.strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body).await?;
    }

    let response = route(&store, &Request { method, path, body });
    let raw = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.reason(),
        response.body.len(),
        response.body
    );

    write_half.write_all(raw.as_bytes()).await?;
    write_half.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> (ScoreStore, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!("skyflap_server_{}.json", Uuid::new_v4()));
        let store = ScoreStore::open(&path).expect("open should succeed");
        (store, path)
    }

    fn post(path: &str, body: &str) -> Request {
        Request {
            method: "POST".to_string(),
            path: path.to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn get(path: &str) -> Request {
        Request {
            method: "GET".to_string(),
            path: path.to_string(),
            body: Vec::new(),
        }
    }

    #[test]
    fn test_add_player_returns_201_with_record() {
        let (store, path) = temp_store();
        let response = route(&store, &post("/addPlayer", r#"{"name":"Ada"}"#));
        assert_eq!(response.status, 201);
        let value: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(value["message"], "Score saved!");
        assert_eq!(value["data"]["name"], "Ada");
        assert_eq!(value["data"]["score"], 0);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_add_player_missing_name_is_400() {
        let (store, path) = temp_store();
        for body in [r#"{}"#, r#"{"name":""}"#, r#"{"name":"   "}"#] {
            let response = route(&store, &post("/addPlayer", body));
            assert_eq!(response.status, 400, "body: {}", body);
        }
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_add_score_requires_id_and_score() {
        let (store, path) = temp_store();
        for body in [
            r#"{}"#,
            r#"{"id":"abc"}"#,
            r#"{"currScore":5}"#,
            r#"{"id":"","currScore":5}"#,
            r#"{"id":"abc","currScore":null}"#,
        ] {
            let response = route(&store, &post("/addScore", body));
            assert_eq!(response.status, 400, "body: {}", body);
        }
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_add_score_updates_record() {
        let (store, path) = temp_store();
        let created = store.add_player("Lin").unwrap();
        let body = format!(r#"{{"id":"{}","currScore":17}}"#, created.id);
        let response = route(&store, &post("/addScore", &body));
        assert_eq!(response.status, 201);
        let value: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(value["message"], "Score Updated");
        assert_eq!(value["data"]["score"], 17);
        assert_eq!(value["data"]["_id"], created.id);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_get_scores_sorted_descending() {
        let (store, path) = temp_store();
        let a = store.add_player("A").unwrap();
        let b = store.add_player("B").unwrap();
        store.set_score(&a.id, 5).unwrap();
        store.set_score(&b.id, 50).unwrap();

        let response = route(&store, &get("/getScore"));
        assert_eq!(response.status, 200);
        let value: Value = serde_json::from_str(&response.body).unwrap();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["score"], 50);
        assert_eq!(list[1]["score"], 5);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_unknown_route_is_404() {
        let (store, path) = temp_store();
        let response = route(&store, &get("/leaderboard"));
        assert_eq!(response.status, 404);
        let response = route(&store, &post("/getScore", "{}"));
        assert_eq!(response.status, 404);
        std::fs::remove_file(path).ok();
    }
}
