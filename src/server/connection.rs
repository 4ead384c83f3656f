// Connection handling module
// Serves one TCP connection with the site as the hyper service

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;

use crate::app::AppState;
use crate::handler::Handler;
use crate::logger::{self, AccessLogEntry};
use crate::routing::Site;

/// Handle a single connection in a spawned task.
///
/// The connection is served over HTTP/1.1 with keep-alive and dropped once
/// the configured timeout elapses.
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    site: Arc<Site<Incoming>>,
    state: Arc<AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout = state.config.connection_timeout();
        let access_log = state.config.logging.access_log;

        let service = service_fn(move |req: Request<Incoming>| {
            let site = Arc::clone(&site);
            async move {
                let started = Instant::now();
                let method = req.method().clone();
                let uri = req.uri().to_string();

                let resp = site.serve(req).await;

                if access_log {
                    logger::log_access(&AccessLogEntry {
                        remote_addr: peer_addr,
                        time: Local::now(),
                        method,
                        uri,
                        status: resp.status(),
                        body_bytes: resp.body().size_hint().exact().unwrap_or(0),
                        elapsed: started.elapsed(),
                    });
                }
                Ok::<_, Infallible>(resp)
            }
        });

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service);

        match tokio::time::timeout(timeout, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout.as_secs()
            )),
        }
    });
}
