use tracing::Level;

/// Install a fmt subscriber for binaries and ad-hoc debugging.
///
/// The library itself never installs a subscriber. Calling this more than
/// once is harmless: later calls leave the first subscriber in place.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::TRACE } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
