use std::io;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing compact logs to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub(crate) fn init(verbose: bool) {
    let default_directive = if verbose {
        "extrascope=debug"
    } else {
        "extrascope=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
