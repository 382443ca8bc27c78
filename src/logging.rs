//! Logger setup for the command line tool

use log::LevelFilter;

/// Initialise `env_logger` at `level`.
///
/// `RUST_LOG` is read first; the explicit level then overrides it. HTTP
/// client internals are capped at `info` so debug output stays readable.
pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.format_timestamp_millis();
    builder.try_init()
}
