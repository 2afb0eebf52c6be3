//! Shared helpers for integration tests

use tracing_subscriber::EnvFilter;

/// Route cache logs to the test writer; set `RUST_LOG=seedcache=trace` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
