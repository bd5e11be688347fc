//! Startup and shutdown banners shared by binaries

use tracing::info;

/// Print the startup banner followed by `details`
pub fn print_banner(name: &str, details: &[String]) {
    info!("");
    info!("========================================");
    info!("Starting {}", name);
    for line in details {
        info!("{}", line);
    }
    info!("Press Ctrl+C to stop");
    info!("========================================");
    info!("");
}

pub fn print_shutdown(name: &str) {
    info!("");
    info!("========================================");
    info!("{} stopped gracefully", name);
    info!("========================================");
}
