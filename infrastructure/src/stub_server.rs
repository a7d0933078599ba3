//! Local HTTP stand-ins for the embedding and model services.

use axum::Router;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral localhost port and returns its base URL.
pub(crate) async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}")
}
