//! Serve command - static preview server for a built site

use std::path::Path;

use axum::Router;
use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

/// Create the preview router serving `root`.
pub fn create_router(root: &Path) -> Router {
    Router::new().fallback_service(ServeDir::new(root).append_index_html_on_directories(true))
}

/// Run the serve command.
pub async fn run(root: &Path, port: u16) -> Result<()> {
    tracing::info!(?root, port, "Starting preview server");

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Preview server running at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, create_router(root))
        .await
        .wrap_err("Server error")?;

    Ok(())
}
