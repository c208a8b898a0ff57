use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry), labelled by entity kind
pub static ID_ALLOCATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "shop_id_allocations_total",
        "Identifiers handed out by the random allocator",
        &["entity"]
    )
    .expect("register id_allocations_total")
});

pub static ID_REDRAWS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "shop_id_redraws_total",
        "Candidate identifiers rejected because they collided with a live id",
        &["entity"]
    )
    .expect("register id_redraws_total")
});

pub static DOCUMENT_WRITES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "shop_document_writes_total",
        "Whole-document rewrites",
        &["entity"]
    )
    .expect("register document_writes_total")
});

pub static DOCUMENT_READ_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "shop_document_read_failures_total",
        "Documents that could not be read or parsed",
        &["entity"]
    )
    .expect("register document_read_failures_total")
});

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics encode error: {e}"))
}
