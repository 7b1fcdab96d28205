use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber used by the binaries.
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` picks the level (0 = warn, 1 = info,
/// 2 or more = debug). Calling this twice is harmless.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
