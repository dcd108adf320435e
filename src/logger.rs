//! Logger setup for the command-line binary.

/// Initializes `env_logger`: `Debug` when verbose, `Info` otherwise.
///
/// `RUST_LOG` still overrides the level for individual modules.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
