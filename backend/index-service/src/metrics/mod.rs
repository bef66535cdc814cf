//! Prometheus metrics for index-service.
//!
//! Exposes index collectors and a renderer for the text exposition format.

use prometheus::{Encoder, TextEncoder};

pub mod index;

/// Render every registered collector in Prometheus text format
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;

    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
