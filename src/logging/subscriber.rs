//! Tracing subscriber setup: console formatter and initialisation.
use std::io::IsTerminal as _;

use super::types::Verbosity;

/// Target used by [`Logger::stage`](super::Logger::stage) events.
pub(super) const STAGE_TARGET: &str = "stow::stage";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] printing one line per event,
/// prefixed by severity, coloured only when the writer supports it.
pub(super) struct StowFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for StowFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        if !writer.has_ansi_escapes() {
            return match level {
                tracing::Level::ERROR => writeln!(writer, "error: {msg}"),
                tracing::Level::WARN => writeln!(writer, "warning: {msg}"),
                tracing::Level::INFO if target == STAGE_TARGET => writeln!(writer, "==> {msg}"),
                _ => writeln!(writer, "{msg}"),
            };
        }

        match level {
            tracing::Level::ERROR => writeln!(writer, "\x1b[31merror:\x1b[0m {msg}"),
            tracing::Level::WARN => writeln!(writer, "\x1b[33mwarning:\x1b[0m {msg}"),
            tracing::Level::INFO if target == STAGE_TARGET => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            tracing::Level::INFO => writeln!(writer, "{msg}"),
            _ => writeln!(writer, "\x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Every event goes to stderr so that stdout only carries dry-run commands
/// and version output. Must be called once at program startup, before any
/// logging.
pub fn init_subscriber(verbosity: Verbosity) {
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let console_layer = fmt::layer()
        .event_format(StowFormatter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_filter(verbosity.level_filter());

    tracing_subscriber::registry().with(console_layer).init();
}
