//! Tracing setup for binaries embedding status-context.
//!
//! Filtering comes from `STATUS_CONTEXT_LOG`, then `RUST_LOG`, then the
//! level passed to [`init_tracing`]. The fallback only raises verbosity for
//! this workspace's own crates; everything else stays at `warn`.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "STATUS_CONTEXT_LOG";

const WORKSPACE_TARGETS: [&str; 2] = ["status_context", "status_context_cli"];

/// Filter directive used when neither log variable is set.
fn fallback_directive(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    let mut directive = String::from("warn");
    for target in WORKSPACE_TARGETS {
        directive.push_str(&format!(",{target}={level}"));
    }
    directive
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback_directive(level)))
}

/// Install the global subscriber, logging to stderr so stdout stays free
/// for JSON results. Only the first call in a process takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(env_filter(level));

    let installed = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    if installed.is_err() {
        tracing::debug!(event = "telemetry.already_initialised");
    }
}

/// Run `f` under a thread-local plain-text subscriber and return its output.
#[cfg(test)]
pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_directive_scopes_workspace_crates() {
        assert_eq!(
            fallback_directive(Level::DEBUG),
            "warn,status_context=debug,status_context_cli=debug"
        );
    }

    #[test]
    fn test_fallback_directive_parses() {
        for level in [Level::ERROR, Level::INFO, Level::TRACE] {
            assert!(EnvFilter::try_new(fallback_directive(level)).is_ok());
        }
    }

    #[test]
    fn test_capture_logs_collects_events() {
        let logs = capture_logs(|| tracing::info!(event = "test.captured", "hello"));
        assert!(logs.contains("hello"));
        assert!(logs.contains("test.captured"));
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing(false, Level::INFO);
        init_tracing(true, Level::DEBUG);
    }
}
