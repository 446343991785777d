// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};
use tracing::error;

/// Total number of API requests, labeled by endpoint and response status.
pub static REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "character_api_requests_total",
        "Total number of API requests, labeled by endpoint and status",
        &["endpoint", "status"]
    )
    .expect("Failed to create character_api_requests_total counter vec")
});

/// Histogram for character source call durations in seconds.
pub static SOURCE_CALL_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "character_api_source_call_duration",
        "Character source call durations in seconds",
        &["source", "operation", "result"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to create character source call duration histogram")
});

/// Increment the requests counter
///
/// # Arguments
/// * `endpoint` - Logical endpoint name, e.g. `list_characters`
/// * `status` - Status code of the response
pub fn inc_requests(endpoint: &str, status: StatusCode) {
    REQUESTS
        .with_label_values(&[endpoint, status.as_str()])
        .inc();
}

/// Observe the duration of a character source call
///
/// # Arguments
/// * `source` - Name of the backing source (`marvel` or `static`)
/// * `operation` - The facade operation that was called
/// * `result` - `ok`, `not_found` or `unavailable`
/// * `duration_secs` - The duration of the call in seconds
pub fn observe_source_duration(source: &str, operation: &str, result: &str, duration_secs: f64) {
    SOURCE_CALL_DURATION
        .with_label_values(&[source, operation, result])
        .observe(duration_secs);
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    match String::from_utf8(buffer) {
        Ok(body) => (
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "metrics buffer is not valid UTF-8");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
