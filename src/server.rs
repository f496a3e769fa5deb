//! Router assembly and the serve loop shared by the binary and tests.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the full application router.
///
/// - `GET /`: chat WebSocket.
/// - `/health`, `/api/v1/*`: REST endpoints.
/// - `/static/*`: files under `static_dir` (chat page and wasm bundle).
pub fn build_app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .merge(api::build_router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves `app` on `listener` until the process is stopped.
///
/// Peer addresses are made available to handlers through
/// [`axum::extract::ConnectInfo`].
///
/// # Errors
///
/// Returns the I/O error that stopped the accept loop.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
