//! One-time tracing setup for tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn";

/// Filter directive from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn filter_directive() -> String {
    directive_from(|key| std::env::var(key).ok())
}

fn directive_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("TEST_LOG")
        .or_else(|| lookup("RUST_LOG"))
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Installs the test subscriber. Idempotent; never panics if another
/// subscriber is already installed.
///
/// Set `TEST_LOG_FORMAT=json` to get the same JSON lines the orchestrator
/// binary emits.
///
/// ```bash
/// TEST_LOG=orchestrator=debug cargo test -p orchestrator stall
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::new(filter_directive());
        let json = std::env::var("TEST_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer() // captured per test by cargo/nextest
            .without_time();
        if json {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
