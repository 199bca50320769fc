//! Server configuration from the command line and environment.

use std::net::SocketAddr;

use clap::Parser;

/// Document processing server for procurement notices
#[derive(Parser, Debug, Clone)]
#[command(name = "edital", version, about)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "EDITAL_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Largest accepted request body, in MiB
    #[arg(long = "max-upload-mb", env = "EDITAL_MAX_UPLOAD_MB", default_value_t = 50)]
    pub max_upload_mb: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "EDITAL_LOG", default_value = "edital=info,tower_http=info")]
    pub log_filter: String,
}

impl ServerConfig {
    /// The request body limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
