use std::sync::{Mutex, PoisonError};

pub const TEST_LOG_TARGET: &str = "questscript::test";

/// Receives finished test report lines. Fire-and-forget.
pub trait LogSink: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards report lines to `tracing` under [`TEST_LOG_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn info(&self, message: &str) {
        tracing::info!(target: TEST_LOG_TARGET, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: TEST_LOG_TARGET, "{}", message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// Keeps every line in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take(&self) -> Vec<(LogLevel, String)> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

impl LogSink for MemoryLogSink {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}
