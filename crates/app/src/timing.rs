//! Timing instrumentation for menu commands

use std::io::Write;
use std::time::{Duration, Instant};

/// Run `f`, then report how long it took under `label`
///
/// The elapsed time is written to `out` in the console's performance
/// format and emitted as a debug event.
pub fn timed<W: Write, T>(out: &mut W, label: &str, f: impl FnOnce() -> T) -> std::io::Result<T> {
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    tracing::debug!(command = label, elapsed_ms = millis(elapsed), "Command finished");
    writeln!(
        out,
        "\n[Performance] Function '{}' took {:.4} ms to execute.",
        label,
        millis(elapsed)
    )?;
    Ok(result)
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_returns_result_and_reports() {
        let mut out = Vec::new();
        let value = timed(&mut out, "answer", || 42).unwrap();
        assert_eq!(value, 42);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[Performance] Function 'answer' took"));
        assert!(text.trim_end().ends_with("ms to execute."));
    }
}
