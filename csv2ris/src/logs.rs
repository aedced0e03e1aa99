//! Console logging.
//!
//! Diagnostics go through `tracing` and are rendered on stderr by a
//! `tracing-subscriber` fmt layer. `RUST_LOG` overrides the level chosen
//! from the command line.
//!
//! | flags   | level |
//! |---------|-------|
//! | `-q`    | warn  |
//! | (none)  | info  |
//! | `-v`    | debug |
//! | `-vv`   | trace |

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map CLI flags to a default level.
pub fn level_for(verbosity: u8, quiet: bool) -> Level {
    if quiet {
        return Level::WARN;
    }
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let default_level = level_for(verbosity, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn log_info(msg: impl AsRef<str>) {
    tracing::info!("{}", msg.as_ref());
}

pub fn log_success(msg: impl AsRef<str>) {
    tracing::info!(status = "ok", "{}", msg.as_ref());
}
