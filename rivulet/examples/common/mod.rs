use rivulet_core::RivuletConnector;
use std::sync::Arc;

#[must_use]
pub fn get_connector() -> Arc<dyn RivuletConnector> {
    // Opt into log output with RUST_LOG=debug (requires the `tracing` feature).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    if std::env::var("RIVULET_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Arc::new(rivulet_mock::MockConnector::new())
    } else {
        Arc::new(rivulet_graph::GraphConnector::new_default())
    }
}
