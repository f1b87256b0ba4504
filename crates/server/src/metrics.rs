use std::time::Instant;

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder};

use crate::errors::RpcCode;

// Prometheus metrics (default registry)
pub static RPC_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "user_service_rpc_requests_total",
        "RPC calls by service, method and result code",
        &["service", "method", "code"]
    )
    .expect("register rpc_requests_total")
});

pub static RPC_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "user_service_rpc_duration_seconds",
        "RPC duration in seconds",
        &["service", "method"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register rpc_duration")
});

/// `/rpc/<service>/<method>` into its two labels.
fn rpc_labels(path: &str) -> Option<(String, String)> {
    let rest = path.strip_prefix("/rpc/")?;
    let (service, method) = rest.split_once('/')?;
    Some((service.to_string(), method.to_string()))
}

/// Record one counter sample and one latency sample per RPC call.
pub async fn track_rpc(req: Request, next: Next) -> Response {
    let Some((service, method)) = rpc_labels(req.uri().path()) else {
        return next.run(req).await;
    };
    let start = Instant::now();
    let resp = next.run(req).await;

    let code = match resp.extensions().get::<RpcCode>() {
        Some(code) => code.as_str(),
        None if resp.status().is_success() => "ok",
        None => "unknown",
    };
    RPC_REQUESTS_TOTAL.with_label_values(&[service.as_str(), method.as_str(), code]).inc();
    RPC_DURATION.with_label_values(&[service.as_str(), method.as_str()]).observe(start.elapsed().as_secs_f64());
    resp
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("encode metrics failed: {}", e));
    }
    match String::from_utf8(buffer) {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics not utf-8: {}", e)),
    }
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_rpc_path() {
        assert_eq!(
            rpc_labels("/rpc/userservice.v1.AccountService/ListAccounts"),
            Some(("userservice.v1.AccountService".to_string(), "ListAccounts".to_string()))
        );
        assert_eq!(rpc_labels("/health"), None);
        assert_eq!(rpc_labels("/rpc/only-service"), None);
    }
}
