//! Tracing setup.
//!
//! In the browser every formatted event goes to the devtools console, using
//! the console method that matches its level. Native builds (tests) write to
//! stderr.

use tracing::Level;

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;
    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;

    pub struct ConsoleMakeWriter;

    /// Buffers one event and flushes it to the console on drop.
    pub struct ConsoleWriter {
        level: Level,
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
            let text = String::from_utf8_lossy(&self.buf);
            let line = wasm_bindgen::JsValue::from_str(text.trim_end());
            match self.level {
                Level::ERROR => web_sys::console::error_1(&line),
                Level::WARN => web_sys::console::warn_1(&line),
                Level::INFO => web_sys::console::info_1(&line),
                _ => web_sys::console::debug_1(&line),
            }
        }
    }

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: Level::INFO,
                buf: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: *meta.level(),
                buf: Vec::new(),
            }
        }
    }
}

/// Installs the global subscriber. Later calls are no-ops.
#[cfg(target_arch = "wasm32")]
pub fn init(max_level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(console::ConsoleMakeWriter)
        .without_time()
        .with_target(false)
        .with_max_level(max_level)
        .try_init();
}

/// Installs the global subscriber. Later calls are no-ops.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(max_level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .without_time()
        .with_max_level(max_level)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init(Level::DEBUG);
        init(Level::WARN);
        tracing::debug!(attempt = 2, "subscriber already installed");
    }
}
