//! Tracing setup shared by binaries embedding the index service.

use crate::config::{AppConfig, LogFormat};
use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. RUST_LOG wins over the configured level.
pub fn init_tracing(app: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("index_service={},sqlx=warn", app.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);

    match app.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    }
    .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_subscriber_installs_once() {
        let app = AppConfig {
            env: "test".to_string(),
            log_level: "debug".to_string(),
            log_format: LogFormat::Json,
        };

        // only one global subscriber per process
        let _ = init_tracing(&app);
        assert!(init_tracing(&app).is_err());
    }
}
