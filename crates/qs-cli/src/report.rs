use std::sync::atomic::{AtomicUsize, Ordering};

use qs_runtime::LogSink;

/// Counts report lines by severity while passing them on.
#[derive(Debug, Default)]
pub(crate) struct TallyLogSink<S> {
    inner: S,
    info: AtomicUsize,
    error: AtomicUsize,
}

impl<S: LogSink> TallyLogSink<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self {
            inner,
            info: AtomicUsize::new(0),
            error: AtomicUsize::new(0),
        }
    }

    pub(crate) fn info_count(&self) -> usize {
        self.info.load(Ordering::SeqCst)
    }

    pub(crate) fn error_count(&self) -> usize {
        self.error.load(Ordering::SeqCst)
    }
}

impl<S: LogSink> LogSink for TallyLogSink<S> {
    fn info(&self, message: &str) {
        self.info.fetch_add(1, Ordering::SeqCst);
        self.inner.info(message);
    }

    fn error(&self, message: &str) {
        self.error.fetch_add(1, Ordering::SeqCst);
        self.inner.error(message);
    }
}
