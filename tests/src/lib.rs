#[macro_use]
mod macros;

mod call_log;
pub use call_log::CallLog;

mod scripted_driver;
pub use scripted_driver::{ScriptedConnection, ScriptedDriver};

use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber honoring `RUST_LOG`. Safe to call
/// from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
