#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

/// Canned responses for an in-process navigation service.
pub struct MockNav {
    pub select: (StatusCode, String),
    pub path: (StatusCode, String),
    pub select_hits: AtomicUsize,
    pub last_path_request: Mutex<Option<Value>>,
}

impl MockNav {
    pub fn new(select: (StatusCode, Value), path: (StatusCode, Value)) -> Arc<Self> {
        Self::raw((select.0, select.1.to_string()), (path.0, path.1.to_string()))
    }

    pub fn raw(select: (StatusCode, String), path: (StatusCode, String)) -> Arc<Self> {
        Arc::new(Self { select, path, select_hits: AtomicUsize::new(0), last_path_request: Mutex::new(None) })
    }

    pub fn select_hits(&self) -> usize {
        self.select_hits.load(Ordering::SeqCst)
    }

    pub fn last_game_state(&self) -> Value {
        self.last_path_request.lock().unwrap().as_ref().expect("no /path request seen")["game_state"].clone()
    }
}

async fn select(State(mock): State<Arc<MockNav>>) -> (StatusCode, String) {
    mock.select_hits.fetch_add(1, Ordering::SeqCst);
    mock.select.clone()
}

async fn path(State(mock): State<Arc<MockNav>>, Json(body): Json<Value>) -> (StatusCode, String) {
    *mock.last_path_request.lock().unwrap() = Some(body);
    mock.path.clone()
}

/// Serves `mock` on an ephemeral port from a background runtime and returns
/// its base URL.
pub fn serve(mock: Arc<MockNav>) -> String {
    let app = Router::new().route("/select", get(select)).route("/path", post(path)).with_state(mock);
    let (tx, rx) = mpsc::channel::<SocketAddr>();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread().worker_threads(1).enable_all().build().unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    format!("http://{}", rx.recv().unwrap())
}

/// A URL nothing is listening on.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
