//! GS File Server - Entry Point
//!
//! HTTP connector for the browser file-manager widget: one configured root
//! directory, exposed through the numeric-action dispatch protocol.

use log::info;

use gs_file_server::Server;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching file manager server...");

    let server = Server::new().await;
    server.start().await;
}
