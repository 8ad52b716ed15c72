pub mod fixtures;
pub mod transport;

/// Route log output through the test harness; `RUST_LOG` selects levels.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
