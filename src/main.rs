use dotenv::dotenv;
use tracing::{info, warn};

use scoutbase_backend::app::app::App;
use scoutbase_backend::util::logger::Logger;

#[tokio::main]
async fn main() {
    // Keep the guards alive for the lifetime of the process
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("🚀 Starting Scoutbase Backend Application");

    match dotenv() {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}
