//! `tracing` output for the browser: each formatted event goes to the devtools
//! console at a matching level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleLevel {
    Log,
    Warn,
    Error,
}

/// Buffers one formatted event and hands it to `console.*` on drop.
pub struct ConsoleWriter {
    level: ConsoleLevel,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        let message = wasm_bindgen::JsValue::from_str(line.trim_end());
        match self.level {
            ConsoleLevel::Log => web_sys::console::log_1(&message),
            ConsoleLevel::Warn => web_sys::console::warn_1(&message),
            ConsoleLevel::Error => web_sys::console::error_1(&message),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: ConsoleLevel::Log,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: console_level(meta.level()),
            buf: Vec::new(),
        }
    }
}

fn console_level(level: &Level) -> ConsoleLevel {
    if *level == Level::ERROR {
        ConsoleLevel::Error
    } else if *level == Level::WARN {
        ConsoleLevel::Warn
    } else {
        ConsoleLevel::Log
    }
}

/// Install the global subscriber. `default_filter` applies when no
/// `RUST_LOG` is available, which in a browser is always.
pub fn init(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_level_mapping() {
        assert_eq!(console_level(&Level::ERROR), ConsoleLevel::Error);
        assert_eq!(console_level(&Level::WARN), ConsoleLevel::Warn);
        assert_eq!(console_level(&Level::INFO), ConsoleLevel::Log);
        assert_eq!(console_level(&Level::TRACE), ConsoleLevel::Log);
    }
}
