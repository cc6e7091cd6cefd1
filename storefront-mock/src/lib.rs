//! storefront-mock - in-memory storefront backend
//!
//! Serves the storefront endpoints from [`AppState`] for local development
//! and the client integration tests.

pub mod api;
pub mod config;
pub mod state;

pub use api::router;
pub use config::MockConfig;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve the mock on an already bound listener
///
/// Peer addresses are recorded for each connection; guest votes are keyed
/// by them.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let app = router(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
