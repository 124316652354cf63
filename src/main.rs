//! Lightboard server binary.

use lightboard::config::AppConfig;
use lightboard::server::{self, StartupError};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    server::init_tracing(&config);
    server::run(config).await
}
