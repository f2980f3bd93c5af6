// Tracing subscriber setup
//
// RUST_LOG wins when set; otherwise `info` for this crate and warnings for
// the HTTP stack, or `debug` everywhere with --verbose.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "companion=info,tower_http=info,warn";
const VERBOSE_FILTER: &str = "companion=debug,tower_http=debug,info";

pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // try_init: a second call (e.g. from tests) is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
