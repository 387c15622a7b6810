//! Logging infrastructure: verbosity levels, the [`Logger`] facade and the
//! stderr subscriber.

mod logger;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, Verbosity};

/// Route tracing events of the current thread into an in-memory buffer,
/// formatted exactly like the console output but without colours.
///
/// Returns the buffer and a [`tracing::dispatcher::DefaultGuard`] that must
/// be kept alive for the duration of the test.
#[cfg(test)]
pub(crate) fn capture(
    verbosity: Verbosity,
) -> (SharedBuffer, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, fmt, layer::SubscriberExt as _};

    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let layer = fmt::layer()
        .event_format(subscriber::StowFormatter)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .with_filter(verbosity.level_filter());
    let subscriber = tracing_subscriber::registry().with(layer);
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (buffer, guard)
}

/// Clonable in-memory writer used to capture formatted events in tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    /// Everything written so far.
    pub(crate) fn contents(&self) -> String {
        let bytes = self
            .0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[cfg(test)]
impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
