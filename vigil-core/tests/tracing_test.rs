//! Tracing setup sanity: initialization is idempotent.

use vigil_core::trace::init_tracing;

#[test]
fn init_is_idempotent() {
    init_tracing();
    init_tracing();

    // emitting through the initialized subscriber must not panic
    tracing::info!(component = "tracing_test", "subscriber alive");
}
