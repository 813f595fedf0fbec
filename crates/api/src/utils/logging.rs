use std::time::{Duration, Instant};

use shiftline_domain::{Result, ShiftlineError};
use tracing::{info, warn};

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a logical identifier such as `"tracking::start_activity"`;
/// callers must not put operator data in it.
#[inline]
pub fn log_command_execution(
    command: &str,
    elapsed: Duration,
    success: bool,
    error_type: Option<&str>,
) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, error_type, "command_execution_failure");
    }
}

/// Stable label for an error, suitable for logging fields.
#[inline]
pub fn error_label(error: &ShiftlineError) -> &'static str {
    error.label()
}

/// Log a fallible command's outcome and pass the result through.
pub fn finish<T>(command: &str, started: Instant, result: Result<T>) -> Result<T> {
    let error_type = result.as_ref().err().map(error_label);
    log_command_execution(command, started.elapsed(), result.is_ok(), error_type);
    result
}

/// Log an infallible command's execution and pass the value through.
pub fn finish_ok<T>(command: &str, started: Instant, value: T) -> T {
    log_command_execution(command, started.elapsed(), true, None);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_passes_results_through() {
        let ok: Result<u8> = finish("test::ok", Instant::now(), Ok(7));
        assert_eq!(ok.unwrap(), 7);

        let err: Result<u8> =
            finish("test::err", Instant::now(), Err(ShiftlineError::InvalidInput("x".into())));
        assert!(matches!(err, Err(ShiftlineError::InvalidInput(_))));
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(error_label(&ShiftlineError::Persistence("disk".into())), "persistence");
        assert_eq!(error_label(&ShiftlineError::Config("bad".into())), "config");
    }
}
