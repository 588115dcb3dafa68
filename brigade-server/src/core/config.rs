use crate::kitchen::Station;
use std::collections::HashMap;

/// Server configuration - all settings of the kitchen node
///
/// # Environment variables
///
/// Every setting can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | Runtime environment |
/// | PAPER_WIDTH | 48 | Ticket printer columns (58mm: 32, 80mm: 48) |
/// | PRINTER_TIMEOUT_MS | 5000 | Printer connection timeout |
/// | CLIENT_REFRESH_SECS | 30 | Poll interval hint handed to displays |
/// | PRINTER_GRILL .. PRINTER_GENERAL | unset | Station printer `host:port` |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 PRINTER_GRILL=192.168.1.40:9100 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Ticket printer paper width in characters
    pub paper_width: usize,
    /// Printer connection timeout (milliseconds)
    pub printer_timeout_ms: u64,
    /// Poll interval hint for kitchen displays (seconds)
    pub client_refresh_secs: u64,
    /// Station printer endpoints (`host:port`)
    pub printers: HashMap<Station, String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        let mut printers = HashMap::new();
        for station in Station::ALL {
            let var = format!("PRINTER_{}", station.as_str().to_ascii_uppercase());
            if let Ok(addr) = std::env::var(&var)
                && !addr.is_empty()
            {
                printers.insert(station, addr);
            }
        }

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            paper_width: std::env::var("PAPER_WIDTH")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(48),
            printer_timeout_ms: std::env::var("PRINTER_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            client_refresh_secs: std::env::var("CLIENT_REFRESH_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            printers,
        }
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
