//! Tracing layer that captures log lines for the TUI logs panel

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// Lines kept before the oldest are dropped
pub const LOG_CAPACITY: usize = 1000;

/// Shared ring of formatted log lines
#[derive(Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: String) {
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.push_back(line);
        while lines.len() > LOG_CAPACITY {
            lines.pop_front();
        }
    }

    /// The newest `n` lines, oldest first
    pub fn tail(&self, n: usize) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        let skip = lines.len().saturating_sub(n);
        lines.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(feature = "tracing")]
pub use layer::TuiLogLayer;

#[cfg(feature = "tracing")]
mod layer {
    use {
        super::LogBuffer,
        std::fmt::Write as _,
        tracing::{Event, Level, Subscriber, field::Field},
        tracing_subscriber::{Layer, layer::Context, registry::LookupSpan},
    };

    /// Formats each event as `HH:MM:SS [LEVEL] message key=value` into a `LogBuffer`
    pub struct TuiLogLayer {
        buffer: LogBuffer,
    }

    impl TuiLogLayer {
        pub fn new(buffer: LogBuffer) -> Self {
            Self { buffer }
        }
    }

    impl<S> Layer<S> for TuiLogLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let level = match *event.metadata().level() {
                Level::ERROR => "ERROR",
                Level::WARN => "WARN",
                Level::INFO => "INFO",
                Level::DEBUG => "DEBUG",
                Level::TRACE => "TRACE",
            };

            let mut visitor = LineVisitor::default();
            event.record(&mut visitor);

            let mut line = format!(
                "{} [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                level,
                visitor.message
            );
            if !visitor.fields.is_empty() {
                line.push(' ');
                line.push_str(&visitor.fields);
            }
            self.buffer.push(line);
        }
    }

    #[derive(Default)]
    struct LineVisitor {
        message: String,
        fields: String,
    }

    impl LineVisitor {
        fn push_field(&mut self, field: &Field, value: std::fmt::Arguments<'_>) {
            if !self.fields.is_empty() {
                self.fields.push(' ');
            }
            let _ = write!(self.fields, "{}={}", field.name(), value);
        }
    }

    impl tracing::field::Visit for LineVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.message = value.to_string();
            } else {
                self.push_field(field, format_args!("{}", value));
            }
        }

        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            // Formatted messages (`info!("x {}", y)`) arrive here as fmt::Arguments
            if field.name() == "message" {
                self.message = format!("{:?}", value);
            } else {
                self.push_field(field, format_args!("{:?}", value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_keeps_newest_lines() {
        let buffer = LogBuffer::new();
        for i in 0..(LOG_CAPACITY + 5) {
            buffer.push(format!("line {}", i));
        }
        assert_eq!(buffer.len(), LOG_CAPACITY);
        let tail = buffer.tail(2);
        assert_eq!(tail, vec![
            format!("line {}", LOG_CAPACITY + 3),
            format!("line {}", LOG_CAPACITY + 4),
        ]);
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_layer_formats_message_and_fields() {
        use tracing_subscriber::prelude::*;

        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Fetched {} tokens", 100);
            tracing::warn!(status = 429, "rate limited");
        });

        let lines = buffer.tail(10);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[INFO] Fetched 100 tokens"));
        assert!(lines[1].contains("[WARN] rate limited status=429"));
    }
}
