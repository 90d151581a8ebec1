//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "ostap=info";

/// Installs a fmt subscriber writing to stderr. `RUST_LOG` wins over
/// `directive`; a second call is a no-op.
pub fn init(directive: Option<&str>) {
    let directive = directive.unwrap_or(DEFAULT_DIRECTIVE);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
