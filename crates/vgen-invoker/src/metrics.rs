//! Generation metrics.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const GENERATIONS_TOTAL: &str = "vgen_generations_total";
    pub const GENERATION_DURATION_SECONDS: &str = "vgen_generation_duration_seconds";
}

/// Record one finished generation attempt.
pub fn record_generation(transport: &str, outcome: &str, duration_secs: f64) {
    let labels = [
        ("transport", transport.to_string()),
        ("outcome", outcome.to_string()),
    ];

    counter!(names::GENERATIONS_TOTAL, &labels).increment(1);
    histogram!(names::GENERATION_DURATION_SECONDS, &labels).record(duration_secs);
}
