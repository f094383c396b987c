use std::fmt;

/// Logging capability handed to the selector and resolver.
pub trait Logger: fmt::Debug + Send + Sync {
  fn debug(&self, _message: &str) {}
  fn info(&self, message: &str);
  fn warn(&self, message: &str);
  fn error(&self, message: &str);
}

/// Discards everything. The default when no logger is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
  fn info(&self, _message: &str) {}
  fn warn(&self, _message: &str) {}
  fn error(&self, _message: &str) {}
}

/// Forwards to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
  fn debug(&self, message: &str) {
    tracing::debug!("{message}");
  }

  fn info(&self, message: &str) {
    tracing::info!("{message}");
  }

  fn warn(&self, message: &str) {
    tracing::warn!("{message}");
  }

  fn error(&self, message: &str) {
    tracing::error!("{message}");
  }
}
