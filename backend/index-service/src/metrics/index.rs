use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

lazy_static! {
    /// Index requests segmented by strategy and viewer audience.
    pub static ref INDEX_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "index_posts_requests_total",
        "Total index timeline requests segmented by strategy and audience",
        &["mode", "audience"]
    )
    .expect("failed to register index_posts_requests_total");

    /// Failed index requests by strategy and failing stage.
    pub static ref INDEX_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "index_posts_errors_total",
        "Failed index timeline requests segmented by strategy and stage",
        &["mode", "stage"]
    )
    .expect("failed to register index_posts_errors_total");

    pub static ref INDEX_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "index_posts_duration_seconds",
        "Index timeline request duration segmented by strategy",
        &["mode"]
    )
    .expect("failed to register index_posts_duration_seconds");

    /// Friend lookups that failed, by configured policy (degrade/fail).
    pub static ref GRAPH_LOOKUP_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "index_graph_lookup_failures_total",
        "Relationship graph lookup failures segmented by failure policy",
        &["policy"]
    )
    .expect("failed to register index_graph_lookup_failures_total");
}
