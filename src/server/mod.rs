// Server module
// Accept loop serving the demo site until a shutdown signal arrives

mod connection;
mod listener;
mod signal;

pub use connection::handle_connection;
pub use listener::create_listener;
pub use signal::shutdown_signal;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::app::{self, AppState};
use crate::logger;

/// Accept connections on `listener` until `shutdown` resolves
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()>,
) -> std::io::Result<()> {
    let site = Arc::new(app::build_site(&state));
    if site.is_empty() {
        logger::log_warning("Site has no rules, every request will be answered with 404");
    } else {
        logger::log_info(&format!("Site ready with {} rules", site.len()));
    }
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&site), Arc::clone(&state));
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
            () = &mut shutdown => {
                logger::log_info(&format!(
                    "Server stopped, {} page views served",
                    state.page_views.count()
                ));
                return Ok(());
            }
        }
    }
}
