//! Welcome Window
//!
//! Shows "WELCOME" in a 640x480 window until it is closed or Escape is
//! pressed.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use welcome_window::{launch, AppConfig, Pacing};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Starting App");

    let config = AppConfig::default();
    let pacing = Pacing::native(config.frame_interval);

    match launch(config, pacing) {
        Ok(()) => {
            tracing::info!("Exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
