//! Test logging setup shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per process.
///
/// Quiet by default; `TEST_LOG` (preferred) or `RUST_LOG` raise the level
/// when a test needs log output.
pub fn init() {
    INIT.get_or_init(|| {
        let directive = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());

        // try_init: another harness may have installed a subscriber already
        let _ = fmt()
            .with_env_filter(EnvFilter::new(directive))
            .with_test_writer()
            .without_time()
            .compact()
            .try_init();
    });
}
