use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: &str = "info,hyper=warn,reqwest=warn";

/// Install the global fmt subscriber once.
///
/// An explicit `level` wins over `RUST_LOG`; with neither, `info` is used and
/// the HTTP stack is kept quiet.
pub fn init_logging(level: Option<&str>) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    INIT.call_once(|| {
        let filter = match level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES)),
        };
        // Another subscriber may have raced us in; keep whichever won.
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}
