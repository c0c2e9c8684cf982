//! Logger setup for binaries, benchmarks and tests that want log output.

use log::LevelFilter;

/// Environment variable holding `env_logger` filter directives.
pub const LOG_ENV: &str = "KNN_LOG";

/// Installs an `env_logger` logger at `warn`, overridable through `KNN_LOG`
/// (e.g. `KNN_LOG=knn_classifier=debug`). Does nothing if a logger is already set.
pub fn init() {
    let _ = env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter(LOG_ENV))
        .try_init();
}
