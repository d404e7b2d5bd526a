//! Shared harness: runs the router in-process on an ephemeral port.

#![allow(dead_code)]

use bookshelf_api::{transport, BookCatalog, FallbackCatalog, JsonFileStore};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub data_file: PathBuf,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(data_file: &Path, fallback: FallbackCatalog) -> Self {
        let store = Arc::new(JsonFileStore::new(data_file, fallback));
        let catalog = BookCatalog::open(store).await;
        let router = transport::http::create_router(transport::http::AppState::new(catalog));

        // Bind to an ephemeral port so tests can run in parallel.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            data_file: data_file.to_path_buf(),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and returns the status with the parsed body (`Null` for an empty body).
    pub async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&str>,
    ) -> (u16, Value) {
        let mut req = self.client.request(method, self.url(path));
        if let Some(body) = body {
            req = req
                .header("content-type", "application/json")
                .body(body.to_string());
        }
        let resp = req.send().await.unwrap();
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap();
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        self.send(reqwest::Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        self.send(reqwest::Method::POST, path, Some(&body.to_string()))
            .await
    }

    pub async fn put(&self, path: &str, body: &Value) -> (u16, Value) {
        self.send(reqwest::Method::PUT, path, Some(&body.to_string()))
            .await
    }

    pub async fn delete(&self, path: &str) -> (u16, Value) {
        self.send(reqwest::Method::DELETE, path, None).await
    }

    /// Creates a book and returns its id.
    pub async fn create(&self, body: &Value) -> String {
        let (status, resp) = self.post("/books", body).await;
        assert_eq!(status, 201, "create failed: {resp}");
        resp["data"]["bookId"].as_str().unwrap().to_string()
    }

    /// The catalog as currently written to disk.
    pub fn on_disk(&self) -> Vec<Value> {
        let text = std::fs::read_to_string(&self.data_file).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

pub fn book_payload(name: &str, page_count: u64, read_page: u64, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2020,
        "author": "X",
        "summary": "s",
        "publisher": format!("{name} Publishing"),
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}
