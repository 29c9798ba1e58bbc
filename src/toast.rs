use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn label(self) -> &'static str {
        match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Warning => "warning",
            ToastLevel::Error => "error",
        }
    }
}

/// Destination for short user-facing feedback messages.
pub trait ToastSink {
    fn toast(&mut self, message: &str, level: ToastLevel);
}

/// Keeps the most recent toast for the dashboard status line and mirrors
/// every message to the log.
#[derive(Default)]
pub struct StatusLine {
    last: Option<(String, ToastLevel)>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<(&str, ToastLevel)> {
        self.last
            .as_ref()
            .map(|(message, level)| (message.as_str(), *level))
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

impl ToastSink for StatusLine {
    fn toast(&mut self, message: &str, level: ToastLevel) {
        match level {
            ToastLevel::Error => error!("{message}"),
            ToastLevel::Warning => warn!("{message}"),
            ToastLevel::Info | ToastLevel::Success => info!("{message}"),
        }
        self.last = Some((message.to_string(), level));
    }
}

/// Collects every toast in order. Used by the headless export command and
/// by tests asserting on exact feedback sequences.
#[derive(Default)]
pub struct MemorySink {
    pub entries: Vec<(String, ToastLevel)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToastSink for MemorySink {
    fn toast(&mut self, message: &str, level: ToastLevel) {
        self.entries.push((message.to_string(), level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_keeps_latest_toast() {
        let mut status = StatusLine::new();
        assert!(status.last().is_none());

        status.toast("Connection lost - working offline", ToastLevel::Warning);
        status.toast("Connection restored", ToastLevel::Success);

        assert_eq!(
            status.last(),
            Some(("Connection restored", ToastLevel::Success))
        );
    }

    #[test]
    fn memory_sink_preserves_order() {
        let mut sink = MemorySink::new();
        sink.toast("first", ToastLevel::Info);
        sink.toast("second", ToastLevel::Error);
        assert_eq!(sink.entries[0].0, "first");
        assert_eq!(sink.entries[1].1, ToastLevel::Error);
    }
}
