//! Canned-response HTTP stub on loopback
//!
//! A single warp filter answers every request with the response routed for
//! its path, or 404 when unrouted, and records the path.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use warp::http::StatusCode;
use warp::path::FullPath;
use warp::Filter;

/// Status and JSON body served for one path
#[derive(Debug, Clone)]
pub struct StubResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl StubResponse {
    /// 200 with `body`
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Bare status with an empty body
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            body: "Not Found".to_string(),
        }
    }
}

/// Loopback server with a fixed route table; stops when dropped
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl StubServer {
    /// Bind to an ephemeral port and serve `routes` keyed by request path
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// The loopback bind fails
    pub fn start<I>(routes: I) -> Result<Self, warp::Error>
    where
        I: IntoIterator<Item = (String, StubResponse)>,
    {
        let routes: Arc<HashMap<String, StubResponse>> = Arc::new(routes.into_iter().collect());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        let filter = warp::path::full().map(move |path: FullPath| {
            let path = path.as_str().to_string();
            log.lock().push(path.clone());

            let response = routes.get(&path).cloned().unwrap_or_else(StubResponse::not_found);
            let status =
                StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            warp::reply::with_status(
                warp::reply::with_header(response.body, "content-type", "application/json"),
                status,
            )
        });

        let (addr, server) = warp::serve(filter).try_bind_ephemeral(([127, 0, 0, 1], 0))?;
        let task = tokio::spawn(server);

        Ok(Self {
            addr,
            requests,
            task,
        })
    }

    /// Server with no routes; every request gets a 404
    ///
    /// # Errors
    /// See [`StubServer::start`]
    pub fn empty() -> Result<Self, warp::Error> {
        Self::start(HashMap::<String, StubResponse>::new())
    }

    /// API root to hand to the lookup client
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v2", self.addr)
    }

    /// Request paths seen so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
