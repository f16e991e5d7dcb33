use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle, opt_format};

/// Start logging to stderr, using `RUST_LOG` when set and `level` otherwise.
///
/// The returned handle must stay alive for as long as logging is needed.
pub fn init(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(opt_format)
        .start()
}
